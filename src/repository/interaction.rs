//! Likes and comments. Every write keeps the cached counters on `logs` in step.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::interaction::{Comment, Like, NewComment, NewLike, UpdateComment};
use crate::domain::types::{CommentId, LogId, UserId};
use crate::models::interaction::{
    Comment as DbComment, Like as DbLike, NewComment as DbNewComment, NewLike as DbNewLike,
    UpdateComment as DbUpdateComment,
};
use crate::pagination::{Paginated, Sort, SortDirection, paginate};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    COMMENT_SORT_COLUMNS, CommentListQuery, DieselRepository, InteractionReader,
    InteractionWriter,
};
use crate::schema::{comments, likes, logs};

fn live_comments_of(log_id: &str) -> comments::BoxedQuery<'static, Sqlite> {
    comments::table
        .filter(comments::log_id.eq(log_id.to_string()))
        .filter(comments::deleted_at.is_null())
        .into_boxed::<Sqlite>()
}

fn order_comments(
    query: comments::BoxedQuery<'static, Sqlite>,
    sort: Sort,
) -> comments::BoxedQuery<'static, Sqlite> {
    match sort.direction {
        SortDirection::Asc => query
            .order(comments::created_at.asc())
            .then_order_by(comments::id.asc()),
        SortDirection::Desc => query
            .order(comments::created_at.desc())
            .then_order_by(comments::id.desc()),
    }
}

impl InteractionReader for DieselRepository {
    fn list_likes(&self, log_id: LogId) -> RepositoryResult<Vec<Like>> {
        let mut conn = self.conn()?;

        let db_likes = likes::table
            .filter(likes::log_id.eq(log_id.to_string()))
            .order(likes::created_at.desc())
            .load::<DbLike>(&mut conn)?;

        db_likes
            .into_iter()
            .map(|db_like| Like::try_from(db_like).map_err(RepositoryError::from))
            .collect()
    }

    fn get_comment_by_id(&self, id: CommentId) -> RepositoryResult<Option<Comment>> {
        let mut conn = self.conn()?;

        let db_comment = comments::table
            .filter(comments::id.eq(id.to_string()))
            .filter(comments::deleted_at.is_null())
            .first::<DbComment>(&mut conn)
            .optional()?;

        match db_comment {
            Some(db_comment) => Ok(Some(Comment::try_from(db_comment)?)),
            None => Ok(None),
        }
    }

    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<Paginated<Comment>> {
        let mut conn = self.conn()?;
        let log_id = query.log_id.to_string();

        let page = paginate(
            &mut conn,
            &query.pagination,
            COMMENT_SORT_COLUMNS,
            |conn| {
                live_comments_of(&log_id)
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(RepositoryError::from)
            },
            |conn, window| {
                order_comments(live_comments_of(&log_id), window.sort)
                    .offset(window.offset)
                    .limit(window.limit)
                    .load::<DbComment>(conn)
                    .map_err(RepositoryError::from)
            },
        )?;

        page.try_map(|db_comment| Comment::try_from(db_comment).map_err(RepositoryError::from))
    }
}

impl InteractionWriter for DieselRepository {
    fn create_like(&self, new_like: &NewLike) -> RepositoryResult<Like> {
        let mut conn = self.conn()?;

        let db_new_like: DbNewLike = new_like.into();

        let db_like = conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_like = diesel::insert_into(likes::table)
                .values(&db_new_like)
                .get_result::<DbLike>(conn)?;

            diesel::update(logs::table.filter(logs::id.eq(&db_new_like.log_id)))
                .set(logs::like_count.eq(logs::like_count + 1))
                .execute(conn)?;

            Ok(db_like)
        })?;

        Ok(Like::try_from(db_like)?)
    }

    fn delete_like(&self, user_profile_id: UserId, log_id: LogId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let user_profile_id = user_profile_id.to_string();
        let log_id = log_id.to_string();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let removed = diesel::delete(
                likes::table
                    .filter(likes::user_profile_id.eq(&user_profile_id))
                    .filter(likes::log_id.eq(&log_id)),
            )
            .execute(conn)?;

            if removed == 0 {
                return Err(RepositoryError::NotFound);
            }

            diesel::update(
                logs::table
                    .filter(logs::id.eq(&log_id))
                    .filter(logs::like_count.gt(0)),
            )
            .set(logs::like_count.eq(logs::like_count - 1))
            .execute(conn)?;

            Ok(())
        })
    }

    fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment> {
        let mut conn = self.conn()?;

        let db_new_comment: DbNewComment = new_comment.into();

        let db_comment = conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_comment = diesel::insert_into(comments::table)
                .values(&db_new_comment)
                .get_result::<DbComment>(conn)?;

            diesel::update(logs::table.filter(logs::id.eq(&db_new_comment.log_id)))
                .set(logs::comment_count.eq(logs::comment_count + 1))
                .execute(conn)?;

            Ok(db_comment)
        })?;

        Ok(Comment::try_from(db_comment)?)
    }

    fn update_comment(&self, id: CommentId, updates: &UpdateComment) -> RepositoryResult<Comment> {
        let mut conn = self.conn()?;

        let changes: DbUpdateComment = updates.into();
        let db_comment = diesel::update(
            comments::table
                .filter(comments::id.eq(id.to_string()))
                .filter(comments::deleted_at.is_null()),
        )
        .set(&changes)
        .get_result::<DbComment>(&mut conn)?;

        Ok(Comment::try_from(db_comment)?)
    }

    fn delete_comment(&self, id: CommentId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let id = id.to_string();
        let now = Utc::now().naive_utc();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_comment = diesel::update(
                comments::table
                    .filter(comments::id.eq(&id))
                    .filter(comments::deleted_at.is_null()),
            )
            .set((comments::deleted_at.eq(Some(now)), comments::updated_at.eq(now)))
            .get_result::<DbComment>(conn)?;

            diesel::update(
                logs::table
                    .filter(logs::id.eq(&db_comment.log_id))
                    .filter(logs::comment_count.gt(0)),
            )
            .set(logs::comment_count.eq(logs::comment_count - 1))
            .execute(conn)?;

            Ok(())
        })
    }
}
