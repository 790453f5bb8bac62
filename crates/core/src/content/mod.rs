mod entity;
mod error;
mod image;
mod operations;
mod requests;
mod types;

pub use entity::{compress_all, Entity, HasImage, ImageCompressor};
pub use error::ContentError;
pub use image::{mime_type, parse_data_url, DataUrl};
pub use operations::{distinct_years, parse_title_list, unique_titles};
pub use requests::{
    BlogRequest, CategoryRequest, ContactMessage, ContactRequest, FavouriteEntry,
    FavouritesRequest, PictureRequest, MAX_KEY_LEN,
};
pub use types::{Blog, Category, FavouritePicture, Picture, User};
