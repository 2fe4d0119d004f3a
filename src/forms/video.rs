use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{VideoTitle, VideoUrl, non_blank};
use crate::domain::video::NewVideo;
use crate::forms::{FormError, optional_image};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing a video.
pub struct VideoForm {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(url)]
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl TryFrom<VideoForm> for NewVideo {
    type Error = FormError;

    fn try_from(form: VideoForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewVideo {
            title: VideoTitle::new(form.title).map_err(|_| FormError::InvalidName)?,
            description: non_blank(form.description),
            video_url: VideoUrl::new(form.video_url).map_err(|_| FormError::InvalidUrl)?,
            thumbnail_url: optional_image(form.thumbnail_url)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_url_must_be_absolute() {
        let result = NewVideo::try_from(VideoForm {
            title: "Refinery tour".to_string(),
            description: None,
            video_url: "watch?v=1".to_string(),
            thumbnail_url: None,
        });
        assert!(matches!(result, Err(FormError::Validation(_))));
    }
}
