use super::{Blog, Category, FavouritePicture, Picture, User};

/// A row owned by exactly one gateway and addressed by a unique natural key.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human readable type name used in errors and logs.
    const KIND: &'static str;

    /// The unique natural key (title, name or username).
    fn key(&self) -> &str;
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn key(&self) -> &str {
        &self.username
    }
}

impl Entity for Category {
    const KIND: &'static str = "Category";

    fn key(&self) -> &str {
        &self.name
    }
}

impl Entity for Picture {
    const KIND: &'static str = "Picture";

    fn key(&self) -> &str {
        &self.title
    }
}

impl Entity for Blog {
    const KIND: &'static str = "Blog";

    fn key(&self) -> &str {
        &self.title
    }
}

/// Entities that carry an encoded image.
pub trait HasImage {
    fn image_format(&self) -> &str;
    fn image(&self) -> &[u8];
    fn replace_image(&mut self, image: Vec<u8>);
}

impl HasImage for Picture {
    fn image_format(&self) -> &str {
        &self.image_format
    }

    fn image(&self) -> &[u8] {
        &self.image
    }

    fn replace_image(&mut self, image: Vec<u8>) {
        self.image = image;
    }
}

impl HasImage for Blog {
    fn image_format(&self) -> &str {
        &self.image_format
    }

    fn image(&self) -> &[u8] {
        &self.image
    }

    fn replace_image(&mut self, image: Vec<u8>) {
        self.image = image;
    }
}

impl HasImage for FavouritePicture {
    fn image_format(&self) -> &str {
        &self.picture.image_format
    }

    fn image(&self) -> &[u8] {
        &self.picture.image
    }

    fn replace_image(&mut self, image: Vec<u8>) {
        self.picture.image = image;
    }
}

/// Produces a smaller encoding of an image for list views.
pub trait ImageCompressor: Send + Sync {
    /// Returns `None` when the image should be kept as is.
    fn compress(&self, image_format: &str, image: &[u8]) -> Option<Vec<u8>>;
}

/// Copies `items`, replacing each image with its compressed form.
pub fn compress_all<E>(items: &[E], compressor: &dyn ImageCompressor) -> Vec<E>
where
    E: HasImage + Clone,
{
    items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if let Some(smaller) = compressor.compress(item.image_format(), item.image()) {
                item.replace_image(smaller);
            }
            item
        })
        .collect()
}
