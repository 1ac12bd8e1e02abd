use strum::{Display, EnumIter, EnumString};

pub mod quality;
pub use quality::Quality;

pub mod response_format;
pub use response_format::{ImagePayload, ResponseFormat};

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
    Hash,
    PartialEq,
    Eq,
    Default,
)]
pub enum Model {
    #[default]
    #[strum(serialize = "gpt-image-1")]
    #[value(name = "gpt-image-1")]
    GptImage1,
    #[strum(serialize = "dall-e-3")]
    #[value(name = "dall-e-3")]
    DallE3,
}

/// How a model hands back the generated image
#[derive(Debug, Clone, Copy, Display, EnumIter, Hash, PartialEq, Eq)]
pub enum ModelFamily {
    /// Inline base64 payload in the generation response
    InlineBase64,
    /// A URL that has to be fetched in a second request
    RemoteUrl,
}

impl Model {
    pub fn family(&self) -> ModelFamily {
        match self {
            Model::GptImage1 => ModelFamily::InlineBase64,
            Model::DallE3 => ModelFamily::RemoteUrl,
        }
    }

    pub fn supported_sizes(&self) -> &'static [Size] {
        match self {
            Model::GptImage1 => &[
                Size::Square1024,
                Size::Portrait1024x1536,
                Size::Landscape1536x1024,
            ],
            Model::DallE3 => &[
                Size::Square1024,
                Size::Portrait1024x1792,
                Size::Landscape1792x1024,
            ],
        }
    }

    pub fn supports_size(&self, size: Size) -> bool {
        self.supported_sizes().contains(&size)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
    Hash,
    PartialEq,
    Eq,
    Default,
)]
pub enum Size {
    #[default]
    #[strum(serialize = "1024x1024")]
    #[value(name = "1024x1024")]
    Square1024,
    #[strum(serialize = "1024x1792")]
    #[value(name = "1024x1792")]
    Portrait1024x1792,
    #[strum(serialize = "1792x1024")]
    #[value(name = "1792x1024")]
    Landscape1792x1024,
    #[strum(serialize = "1024x1536")]
    #[value(name = "1024x1536")]
    Portrait1024x1536,
    #[strum(serialize = "1536x1024")]
    #[value(name = "1536x1024")]
    Landscape1536x1024,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn wire_names() {
        assert_eq!(Model::GptImage1.to_string(), "gpt-image-1");
        assert_eq!(Model::DallE3.to_string(), "dall-e-3");
        assert_eq!(Model::default(), Model::GptImage1);
        assert_eq!(Size::default().to_string(), "1024x1024");
        let sizes: Vec<_> = Size::iter().map(|s| s.to_string()).collect();
        assert_eq!(
            sizes,
            ["1024x1024", "1024x1792", "1792x1024", "1024x1536", "1536x1024"]
        );
    }

    #[test]
    fn families() {
        assert_eq!(Model::GptImage1.family(), ModelFamily::InlineBase64);
        assert_eq!(Model::DallE3.family(), ModelFamily::RemoteUrl);
    }

    #[test]
    fn every_size_is_native_to_some_model() {
        for size in Size::iter() {
            assert!(Model::iter().any(|m| m.supports_size(size)), "{size}");
        }
        assert!(!Model::GptImage1.supports_size(Size::Portrait1024x1792));
        assert!(!Model::DallE3.supports_size(Size::Landscape1536x1024));
    }
}
