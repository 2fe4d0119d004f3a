use crate::domain::video::{NewVideo, UpdateVideo, Video};
use crate::forms::FormError;
use crate::forms::video::VideoForm;
use crate::resources::{FieldKind, FormField, Resource, thumbnail};
use crate::table::view::{Column, escape_html};

fn preview(video: &Video) -> String {
    thumbnail(
        video.thumbnail_url.as_ref().map(|url| url.as_str()),
        &video.title,
    )
}

fn watch(video: &Video) -> String {
    format!(
        "<a target=\"_blank\" rel=\"noopener\" href=\"{}\">Watch</a>",
        escape_html(video.video_url.as_str())
    )
}

impl Resource for Video {
    const TITLE: &'static str = "Videos";
    const SINGULAR: &'static str = "video";
    const SEARCH_COLUMN: &'static str = "title";

    type Form = VideoForm;

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::render("", preview),
            Column::field("Title", "title"),
            Column::field("Description", "description"),
            Column::render("Link", watch),
        ]
    }

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("title", "Title", FieldKind::Text, true),
            FormField::new("video_url", "Video URL", FieldKind::Url, true),
            FormField::new("thumbnail_url", "Thumbnail URL", FieldKind::Url, false),
            FormField::new("description", "Description", FieldKind::Textarea, false),
        ]
    }

    fn new_from_form(form: VideoForm) -> Result<NewVideo, FormError> {
        NewVideo::try_from(form)
    }

    fn update_from_form(form: VideoForm) -> Result<UpdateVideo, FormError> {
        NewVideo::try_from(form)
    }

    fn label(&self) -> String {
        self.title.to_string()
    }
}
