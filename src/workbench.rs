//! Interactive session state: an original image and the result currently on
//! display. Operators always run against the original, so applying one
//! operator after another never chains them.
use crate::catalog::OperatorCatalog;
use crate::error::{Result, VisionError};
use crate::image::Image;

#[derive(Debug, Default)]
pub struct Workbench {
    catalog: OperatorCatalog,
    original: Option<Image>,
    current: Option<Image>,
    last_operator: Option<String>,
}

impl Workbench {
    pub fn new(catalog: OperatorCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &OperatorCatalog {
        &self.catalog
    }

    /// Replace the session image. Rejected images leave the session as it was.
    pub fn load(&mut self, image: Image) -> Result<()> {
        image.validate()?;
        self.current = Some(image.clone());
        self.original = Some(image);
        self.last_operator = None;
        Ok(())
    }

    pub fn original(&self) -> Option<&Image> {
        self.original.as_ref()
    }

    pub fn current(&self) -> Option<&Image> {
        self.current.as_ref()
    }

    pub fn last_operator(&self) -> Option<&str> {
        self.last_operator.as_deref()
    }

    /// Run `name` on the original image and show the result. On error the
    /// current image is kept.
    pub fn apply(&mut self, name: &str) -> Result<&Image> {
        let original = self
            .original
            .as_ref()
            .ok_or_else(|| VisionError::InvalidImage("no image loaded".to_string()))?;
        let out = self.catalog.apply(name, original)?;
        self.last_operator = Some(name.to_string());
        Ok(self.current.insert(out))
    }

    /// Show a copy of the original again.
    pub fn reset(&mut self) {
        self.current = self.original.clone();
        self.last_operator = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image() -> Image {
        let data: Vec<u8> = (0..16 * 8).map(|i| ((i % 16) * 16) as u8).collect();
        Image::from_raw(16, 8, 1, data).unwrap()
    }

    #[test]
    fn apply_always_starts_from_the_original() {
        let catalog = OperatorCatalog::new();
        let mut bench = Workbench::new(catalog.clone());
        let img = gradient_image();
        bench.load(img.clone()).unwrap();

        bench.apply("sobel").unwrap();
        let twice = bench.apply("sobel").unwrap().clone();
        assert_eq!(twice, catalog.apply("sobel", &img).unwrap());
        assert_eq!(bench.last_operator(), Some("sobel"));
    }

    #[test]
    fn reset_restores_the_original() {
        let mut bench = Workbench::default();
        let img = gradient_image();
        bench.load(img.clone()).unwrap();
        bench.apply("otsu").unwrap();
        assert_ne!(bench.current(), Some(&img));
        bench.reset();
        assert_eq!(bench.current(), Some(&img));
        assert!(bench.last_operator().is_none());
    }

    #[test]
    fn failed_apply_keeps_current_image() {
        let mut bench = Workbench::default();
        assert!(matches!(
            bench.apply("sobel"),
            Err(VisionError::InvalidImage(_))
        ));
        bench.load(gradient_image()).unwrap();
        bench.apply("median").unwrap();
        let before = bench.current().cloned();
        assert!(matches!(
            bench.apply("sharpen"),
            Err(VisionError::UnknownOperator(_))
        ));
        assert_eq!(bench.current().cloned(), before);
        assert!(matches!(
            bench.apply("face-detection"),
            Err(VisionError::ClassifierUnavailable(_))
        ));
    }
}
