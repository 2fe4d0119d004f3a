use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::row::Row;
use crate::domain::types::{ImageUrl, VideoId, VideoTitle, VideoUrl};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: VideoId,
    pub title: VideoTitle,
    pub description: Option<String>,
    pub video_url: VideoUrl,
    pub thumbnail_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewVideo {
    pub title: VideoTitle,
    pub description: Option<String>,
    pub video_url: VideoUrl,
    pub thumbnail_url: Option<ImageUrl>,
}

pub type UpdateVideo = NewVideo;

impl Row for Video {
    const TABLE: &'static str = "videos";

    type Id = VideoId;
    type New = NewVideo;
    type Update = UpdateVideo;

    fn id(&self) -> VideoId {
        self.id
    }

    fn field(&self, key: &str) -> Option<String> {
        let value = match key {
            "id" => self.id.to_string(),
            "title" => self.title.to_string(),
            "description" => self.description.clone().unwrap_or_default(),
            "video_url" => self.video_url.to_string(),
            "thumbnail_url" => self
                .thumbnail_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            "created_at" => self.created_at.format("%Y-%m-%d %H:%M").to_string(),
            _ => return None,
        };
        Some(value)
    }
}
