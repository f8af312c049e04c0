//! Log entries with their media attachments and comments.

use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::interaction::Comment;
use crate::domain::log::{Log, Media, NewLog, UpdateLog};
use crate::domain::types::LogId;
use crate::models::interaction::Comment as DbComment;
use crate::models::log::{
    Log as DbLog, Media as DbMedia, NewLog as DbNewLog, NewMedia as DbNewMedia,
    UpdateLog as DbUpdateLog,
};
use crate::pagination::{Paginated, Sort, SortDirection, paginate};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, LOG_SORT_COLUMNS, LogListQuery, LogReader, LogWriter};
use crate::schema::{comments, logs, media};

fn live_logs() -> logs::BoxedQuery<'static, Sqlite> {
    logs::table
        .filter(logs::deleted_at.is_null())
        .into_boxed::<Sqlite>()
}

fn order_logs(
    query: logs::BoxedQuery<'static, Sqlite>,
    sort: Sort,
) -> logs::BoxedQuery<'static, Sqlite> {
    let query = match (sort.column, sort.direction) {
        ("updated_at", SortDirection::Asc) => query.order(logs::updated_at.asc()),
        ("updated_at", SortDirection::Desc) => query.order(logs::updated_at.desc()),
        ("like_count", SortDirection::Asc) => query.order(logs::like_count.asc()),
        ("like_count", SortDirection::Desc) => query.order(logs::like_count.desc()),
        ("comment_count", SortDirection::Asc) => query.order(logs::comment_count.asc()),
        ("comment_count", SortDirection::Desc) => query.order(logs::comment_count.desc()),
        ("created_at", SortDirection::Asc) => query.order(logs::created_at.asc()),
        _ => query.order(logs::created_at.desc()),
    };

    match sort.direction {
        SortDirection::Asc => query.then_order_by(logs::id.asc()),
        SortDirection::Desc => query.then_order_by(logs::id.desc()),
    }
}

/// Attachments and live comments for the given logs, keyed by log id.
struct LogChildren {
    media: HashMap<String, Vec<DbMedia>>,
    comments: HashMap<String, Vec<DbComment>>,
}

impl LogChildren {
    fn load(conn: &mut SqliteConnection, log_ids: &[String]) -> QueryResult<Self> {
        let mut grouped_media: HashMap<String, Vec<DbMedia>> = HashMap::new();
        for item in media::table
            .filter(media::log_id.eq_any(log_ids))
            .order((media::sort_order.asc(), media::id.asc()))
            .load::<DbMedia>(conn)?
        {
            grouped_media.entry(item.log_id.clone()).or_default().push(item);
        }

        let mut grouped_comments: HashMap<String, Vec<DbComment>> = HashMap::new();
        for comment in comments::table
            .filter(comments::log_id.eq_any(log_ids))
            .filter(comments::deleted_at.is_null())
            .order((comments::created_at.asc(), comments::id.asc()))
            .load::<DbComment>(conn)?
        {
            grouped_comments
                .entry(comment.log_id.clone())
                .or_default()
                .push(comment);
        }

        Ok(Self {
            media: grouped_media,
            comments: grouped_comments,
        })
    }

    fn attach(&mut self, db_log: DbLog) -> RepositoryResult<Log> {
        let db_media = self.media.remove(&db_log.id).unwrap_or_default();
        let db_comments = self.comments.remove(&db_log.id).unwrap_or_default();

        let mut log = Log::try_from(db_log)?;
        log.media = db_media
            .into_iter()
            .map(Media::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        log.comments = db_comments
            .into_iter()
            .map(Comment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(log)
    }
}

fn load_one(conn: &mut SqliteConnection, db_log: DbLog) -> RepositoryResult<Log> {
    let mut children = LogChildren::load(conn, std::slice::from_ref(&db_log.id))?;
    children.attach(db_log)
}

impl LogReader for DieselRepository {
    fn get_log_by_id(&self, id: LogId) -> RepositoryResult<Option<Log>> {
        let mut conn = self.conn()?;

        let db_log = live_logs()
            .filter(logs::id.eq(id.to_string()))
            .first::<DbLog>(&mut conn)
            .optional()?;

        db_log.map(|db_log| load_one(&mut conn, db_log)).transpose()
    }

    fn list_logs(&self, query: LogListQuery) -> RepositoryResult<Paginated<Log>> {
        let mut conn = self.conn()?;
        let project_id = query.project_id.to_string();

        let page = paginate(
            &mut conn,
            &query.pagination,
            LOG_SORT_COLUMNS,
            |conn| {
                live_logs()
                    .filter(logs::project_id.eq(project_id.clone()))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(RepositoryError::from)
            },
            |conn, window| {
                order_logs(
                    live_logs().filter(logs::project_id.eq(project_id.clone())),
                    window.sort,
                )
                .offset(window.offset)
                .limit(window.limit)
                .load::<DbLog>(conn)
                .map_err(RepositoryError::from)
            },
        )?;

        let ids = page
            .items
            .iter()
            .map(|db_log| db_log.id.clone())
            .collect::<Vec<_>>();
        let mut children = LogChildren::load(&mut conn, &ids)?;

        page.try_map(|db_log| children.attach(db_log))
    }
}

impl LogWriter for DieselRepository {
    fn create_log(&self, new_log: &NewLog) -> RepositoryResult<Log> {
        let mut conn = self.conn()?;

        let db_new_log: DbNewLog = new_log.into();
        let db_new_media = new_log
            .media
            .iter()
            .map(|item| DbNewMedia::from_domain(new_log.id, item))
            .collect::<Vec<_>>();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_log = diesel::insert_into(logs::table)
                .values(&db_new_log)
                .get_result::<DbLog>(conn)?;

            for item in &db_new_media {
                diesel::insert_into(media::table)
                    .values(item)
                    .execute(conn)?;
            }

            load_one(conn, db_log)
        })
    }

    fn update_log(&self, id: LogId, updates: &UpdateLog) -> RepositoryResult<Log> {
        let mut conn = self.conn()?;

        let changes: DbUpdateLog = updates.into();
        let db_log = diesel::update(
            logs::table
                .filter(logs::id.eq(id.to_string()))
                .filter(logs::deleted_at.is_null()),
        )
        .set(&changes)
        .get_result::<DbLog>(&mut conn)?;

        load_one(&mut conn, db_log)
    }

    fn delete_log(&self, id: LogId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let now = Utc::now().naive_utc();
        let affected = diesel::update(
            logs::table
                .filter(logs::id.eq(id.to_string()))
                .filter(logs::deleted_at.is_null()),
        )
        .set((logs::deleted_at.eq(Some(now)), logs::updated_at.eq(now)))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
