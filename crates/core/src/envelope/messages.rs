//! Client-facing messages carried in response envelopes.

// Blogs
pub const POST_BLOG_SUCCESS: &str = "Successfully added new blog.";
pub const POST_BLOG_FAIL_DUPLICATE: &str = "Failed to insert blog due to duplicate title.";
pub const POST_BLOG_FAIL: &str = "Internal error, could not create blog.";
pub const UPDATE_BLOG_SUCCESS: &str = "Blog updated successfully.";
pub const UPDATE_BLOG_NOT_FOUND: &str = "No blog with such title exists.";
pub const UPDATE_BLOG_FAIL: &str = "Internal error, could not update blog.";
pub const GET_ALL_BLOGS_SUCCESS: &str = "Successfully retrieved all blogs.";
pub const GET_ALL_BLOGS_FAIL: &str = "Internal error, could not get all blogs.";
pub const GET_BLOG_BY_TITLE_SUCCESS: &str = "Successfully retrieved blog.";
pub const GET_BLOG_WRONG_PARAMETER: &str = "Error, client must supply valid title as parameter.";
pub const GET_BLOG_BY_TITLE_NOT_FOUND: &str =
    "Could not get blog, no blog with such title exists.";
pub const GET_BLOG_BY_TITLE_FAIL: &str = "Internal error, could not get blog by title.";
pub const DELETE_BLOG_SUCCESS: &str = "Blog deleted successfully.";
pub const DELETE_BLOG_FAIL_NOT_FOUND: &str =
    "Could not delete blog, no blog with such title exists.";
pub const DELETE_BLOG_FAIL: &str = "Internal error, could not delete blog.";
pub const INVALID_BLOG_DATA: &str =
    "Error, blog must have a title, content and a base64 data URL image.";

// Pictures
pub const POST_PICTURE_SUCCESS: &str = "Successfully added new picture.";
pub const POST_PICTURE_FAIL_DUPLICATE: &str = "Failed to insert picture due to duplicate title.";
pub const POST_PICTURE_FAIL: &str = "Internal error, could not save new picture.";
pub const UPDATE_PICTURE_SUCCESS: &str = "Picture updated successfully.";
pub const UPDATE_PICTURE_FAIL: &str = "Internal error, could not update picture.";
pub const UPDATE_PICTURE_NOT_FOUND: &str = "No picture with such title exists.";
pub const GET_ALL_PICTURES_SUCCESS: &str = "Successfully retrieved all pictures.";
pub const GET_ALL_PICTURES_FAIL: &str = "Internal error, could not get all pictures.";
pub const GET_PICTURE_BY_TITLE_SUCCESS: &str = "Successfully retrieved picture.";
pub const GET_PICTURE_WRONG_PARAMETER: &str =
    "Error, client must supply valid title as parameter.";
pub const GET_PICTURE_BY_TITLE_NOT_FOUND: &str =
    "Could not get picture, no picture with such title exists.";
pub const GET_PICTURE_BY_TITLE_FAIL: &str = "Internal error, could not get picture by title.";
pub const GET_PICTURE_YEARS_SUCCESS: &str = "Successfully retrieved picture years.";
pub const GET_PICTURE_YEARS_FAIL: &str = "Internal error, could not get picture years.";
pub const DELETE_PICTURE_SUCCESS: &str = "Picture deleted successfully.";
pub const DELETE_PICTURE_FAIL: &str = "Internal error, could not delete picture.";
pub const DELETE_PICTURE_FAIL_NOT_FOUND: &str =
    "Could not delete picture, no picture with such title exists.";
pub const PICTURE_CATEGORY_NOT_FOUND: &str =
    "Error, the picture references a category that does not exist.";
pub const INVALID_PICTURE_DATA: &str =
    "Error, picture must have a title, a category and a base64 data URL image.";

// Favourite pictures
pub const GET_FAVOURITE_PICTURES_SUCCESS: &str = "Successfully retrieved pictures for home.";
pub const GET_FAVOURITE_PICTURES_FAIL: &str =
    "Internal error, could not get pictures for home screen.";
pub const UPDATE_FAVOURITE_PICTURES_SUCCESS: &str = "Pictures for home updated successfully.";
pub const UPDATE_FAVOURITE_PICTURES_NOT_FOUND: &str =
    "Error, one of the pictures for home does not exist.";
pub const UPDATE_FAVOURITE_PICTURES_FAIL: &str =
    "Internal error, could not update pictures for home.";
pub const INVALID_FAVOURITE_PICTURES_DATA: &str =
    "Error, client must supply a list of picture titles.";

// Categories
pub const POST_CATEGORY_SUCCESS: &str = "Successfully added new category.";
pub const POST_CATEGORY_FAIL_DUPLICATE: &str = "Failed to insert category due to duplicate title.";
pub const POST_CATEGORY_FAIL: &str = "Internal error, could not save new category.";
pub const UPDATE_CATEGORY_SUCCESS: &str = "Category updated successfully.";
pub const UPDATE_CATEGORY_NOT_FOUND: &str = "No category with such name exists.";
pub const UPDATE_CATEGORY_FAIL: &str = "Internal error, could not update category.";
pub const GET_ALL_CATEGORIES_SUCCESS: &str = "Successfully retrieved all categories.";
pub const GET_ALL_CATEGORIES_FAIL: &str = "Internal error, could not get all categories.";
pub const GET_CATEGORY_BY_NAME_SUCCESS: &str = "Successfully retrieved category.";
pub const GET_CATEGORY_WRONG_PARAMETER: &str =
    "Error, client must supply valid name as parameter.";
pub const GET_CATEGORY_BY_NAME_NOT_FOUND: &str =
    "Could not get category, no category with such name exists.";
pub const GET_CATEGORY_BY_NAME_FAIL: &str = "Internal error, could not get category by name.";
pub const DELETE_CATEGORY_SUCCESS: &str = "Category deleted successfully.";
pub const DELETE_CATEGORY_FAIL_NOT_FOUND: &str =
    "Could not delete category, no category with such title exists.";
pub const DELETE_CATEGORY_FAIL_IS_IN_USE: &str =
    "Error, client must make sure no picture uses this category before deleting.";
pub const DELETE_CATEGORY_FAIL: &str = "Internal error, could not delete category.";
pub const INVALID_CATEGORY_DATA: &str = "Error, category must have a name and a numeric weight.";

// Users
pub const SUCCESSFULLY_LOGGED_IN: &str = "Successfully logged in.";
pub const SUCCESSFULLY_LOGGED_IN_AS_ADMIN: &str = "Successfully logged in as admin.";
pub const SUCCESSFULLY_LOGGED_OUT: &str = "Successfully logged out.";
pub const SUCCESSFULLY_REGISTERED: &str = "Successfully registered.";
pub const INCORRECT_CREDENTIALS_FOR_LOGIN: &str =
    "Error, email or password are wrong. Please check your details.";
pub const INCORRECT_CREDENTIALS_FOR_REGISTER: &str =
    "Incorrect user data, please make sure the email, password and username are valid.";
pub const ERROR_USER_ALREADY_EXISTS: &str = "Error, user with such email has already been created.";
pub const ERROR_USER_IS_NOT_ACTIVE: &str =
    "Error, this user is not active. Please verify your account via the email you provided.";
pub const ERROR_USER_IS_NOT_AUTHORIZED: &str = "Error, this user is not authorized.";
pub const ERROR_USER_IS_NOT_AUTHENTICATED: &str = "Error, this user is not authenticated.";
pub const USER_UPDATED: &str = "User updated successfully.";
pub const USER_NOT_FOUND: &str = "No user with such username exists.";
pub const INVALID_USER_UPDATE: &str =
    "Error, client must supply a username together with is_admin and is_verified.";
pub const GENERIC_SERVER_ERROR: &str = "Some internal error occurred. Please try again.";

// Contact email
pub const SUCCESSFULLY_SENT_EMAIL: &str = "Message sent successfully.";
pub const ERROR_FAILED_TO_SEND_EMAIL: &str =
    "Some internal error occurred and your message was not sent. Please try again.";
pub const DAILY_LIMIT_EXCEEDED: &str = "Daily limit for message reached. Please try again tomorrow.";
pub const INVALID_EMAIL_DATA: &str = "Error, message must have a name, a valid email and a text.";

// Tokens
pub const MISSING_TOKEN: &str = "Error, authentication token was not provided.";
pub const INVALID_TOKEN: &str = "Error, authentication token is not valid.";
pub const EXPIRED_TOKEN: &str = "Error, authentication token has expired, please log in again.";

// Captcha
pub const INVALID_RECAPTCHA_ERROR: &str = "ERROR, reCAPTCHA is not valid, please try again.";

// Health
pub const PING: &str = "Ping";
