use crate::error::ArgumentError;
use std::path::PathBuf;

/// The validated command line: one or more image paths, in the order they should be loaded.
#[derive(Debug, PartialEq)]
pub struct Config {
    pub images: Vec<PathBuf>,
}

impl Config {
    pub fn new(images: Vec<String>) -> Result<Self, ArgumentError> {
        if images.is_empty() {
            return Err(ArgumentError);
        }

        Ok(Self {
            images: images.into_iter().map(PathBuf::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_with_single_image() {
        let config = Config::new(vec![String::from("program.obj")]).unwrap();

        assert_eq!(config.images, vec![PathBuf::from("program.obj")]);
    }

    #[test]
    fn config_with_multiple_images_preserves_order() {
        let config = Config::new(vec![String::from("a.obj"), String::from("b.obj")]).unwrap();

        assert_eq!(
            config.images,
            vec![PathBuf::from("a.obj"), PathBuf::from("b.obj")]
        );
    }

    #[test]
    fn config_with_no_images_is_an_argument_error() {
        assert!(Config::new(vec![]).is_err());
    }
}
