use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{ImageUrl, TypeConstraintError, VideoId, VideoTitle, VideoUrl};
use crate::domain::video::{NewVideo as DomainNewVideo, Video as DomainVideo};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::videos)]
/// Diesel model for [`crate::domain::video::Video`].
pub struct Video {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::videos)]
pub struct NewVideo<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub video_url: &'a str,
    pub thumbnail_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::videos)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateVideo<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub video_url: &'a str,
    pub thumbnail_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Video> for DomainVideo {
    type Error = TypeConstraintError;

    fn try_from(video: Video) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VideoId::try_from(video.id)?,
            title: VideoTitle::new(video.title)?,
            description: video.description,
            video_url: VideoUrl::new(video.video_url)?,
            thumbnail_url: video.thumbnail_url.map(ImageUrl::new).transpose()?,
            created_at: video.created_at,
            updated_at: video.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewVideo> for NewVideo<'a> {
    fn from(video: &'a DomainNewVideo) -> Self {
        Self {
            title: video.title.as_str(),
            description: video.description.as_deref(),
            video_url: video.video_url.as_str(),
            thumbnail_url: video.thumbnail_url.as_ref().map(ImageUrl::as_str),
        }
    }
}

impl<'a> UpdateVideo<'a> {
    pub fn new(video: &'a DomainNewVideo, updated_at: NaiveDateTime) -> Self {
        let new = NewVideo::from(video);
        Self {
            title: new.title,
            description: new.description,
            video_url: new.video_url,
            thumbnail_url: new.thumbnail_url,
            updated_at,
        }
    }
}
