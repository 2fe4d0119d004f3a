//! Repository implementation for videos.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::video::{Video, NewVideo, UpdateVideo};
use crate::domain::types::VideoId;
use crate::models::video::{
    NewVideo as DbNewVideo, Video as DbVideo, UpdateVideo as DbUpdateVideo,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TableQuery, TableReader, TableWriter};
use crate::schema::videos;

fn filtered(query: &TableQuery) -> RepositoryResult<videos::BoxedQuery<'static, Sqlite>> {
    let mut items = videos::table.into_boxed::<Sqlite>();

    if let Some(search) = &query.search {
        let pattern = search.like_pattern();
        items = match search.column.as_str() {
            "title" => items.filter(videos::title.like(pattern).escape('\\')),
            "description" => items.filter(videos::description.like(pattern).escape('\\')),
            other => {
                return Err(RepositoryError::ValidationError(format!(
                    "column `{other}` is not searchable on videos"
                )));
            }
        };
    }

    Ok(items)
}

impl TableReader<Video> for DieselRepository {
    fn select_rows(&self, query: &TableQuery) -> RepositoryResult<(usize, Vec<Video>)> {
        let mut conn = self.conn()?;

        let total = filtered(query)?.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered(query)?
            .order(videos::created_at.desc())
            .then_order_by(videos::id.desc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = pagination.sql_bounds();
            items = items.offset(offset).limit(limit);
        }

        let videos = items
            .load::<DbVideo>(&mut conn)?
            .into_iter()
            .map(|db_video| Video::try_from(db_video).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, videos))
    }

    fn get_row(&self, id: VideoId) -> RepositoryResult<Option<Video>> {
        let mut conn = self.conn()?;

        let db_video = videos::table
            .find(id.get())
            .first::<DbVideo>(&mut conn)
            .optional()?;

        match db_video {
            Some(db_video) => Ok(Some(
                Video::try_from(db_video).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl TableWriter<Video> for DieselRepository {
    fn insert_row(&self, new_row: &NewVideo) -> RepositoryResult<Video> {
        let mut conn = self.conn()?;

        let insertable = DbNewVideo::from(new_row);
        let db_video = diesel::insert_into(videos::table)
            .values(&insertable)
            .get_result::<DbVideo>(&mut conn)?;

        Ok(Video::try_from(db_video)?)
    }

    fn update_row(&self, id: VideoId, updates: &UpdateVideo) -> RepositoryResult<Video> {
        let mut conn = self.conn()?;

        let changes = DbUpdateVideo::new(updates, Utc::now().naive_utc());
        let db_video = diesel::update(videos::table.find(id.get()))
            .set(&changes)
            .get_result::<DbVideo>(&mut conn)?;

        Ok(Video::try_from(db_video)?)
    }

    fn delete_row(&self, id: VideoId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(videos::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
