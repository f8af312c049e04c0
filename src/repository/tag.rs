use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::tag::{NewTag, Tag, UpdateTag};
use crate::domain::types::TagId;
use crate::models::tag::{NewTag as DbNewTag, Tag as DbTag, UpdateTag as DbUpdateTag};
use crate::pagination::{Paginated, PaginationRequest, Sort, SortDirection, paginate};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TAG_SORT_COLUMNS, TagReader, TagWriter};
use crate::schema::{project_tags, tags};

fn live_tags() -> tags::BoxedQuery<'static, Sqlite> {
    tags::table
        .filter(tags::deleted_at.is_null())
        .into_boxed::<Sqlite>()
}

fn order_tags(
    query: tags::BoxedQuery<'static, Sqlite>,
    sort: Sort,
) -> tags::BoxedQuery<'static, Sqlite> {
    match (sort.column, sort.direction) {
        ("name", SortDirection::Asc) => query.order(tags::name.asc()).then_order_by(tags::id.asc()),
        ("name", SortDirection::Desc) => {
            query.order(tags::name.desc()).then_order_by(tags::id.desc())
        }
        ("created_at", SortDirection::Asc) => {
            query.order(tags::created_at.asc()).then_order_by(tags::id.asc())
        }
        _ => query.order(tags::created_at.desc()).then_order_by(tags::id.desc()),
    }
}

impl TagReader for DieselRepository {
    fn get_tag_by_id(&self, id: TagId) -> RepositoryResult<Option<Tag>> {
        let mut conn = self.conn()?;

        let db_tag = live_tags()
            .filter(tags::id.eq(id.to_string()))
            .first::<DbTag>(&mut conn)
            .optional()?;

        match db_tag {
            Some(db_tag) => Ok(Some(Tag::try_from(db_tag)?)),
            None => Ok(None),
        }
    }

    fn list_tags(&self, pagination: PaginationRequest) -> RepositoryResult<Paginated<Tag>> {
        let mut conn = self.conn()?;

        let page = paginate(
            &mut conn,
            &pagination,
            TAG_SORT_COLUMNS,
            |conn| {
                live_tags()
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(RepositoryError::from)
            },
            |conn, window| {
                order_tags(live_tags(), window.sort)
                    .offset(window.offset)
                    .limit(window.limit)
                    .load::<DbTag>(conn)
                    .map_err(RepositoryError::from)
            },
        )?;

        page.try_map(|db_tag| Tag::try_from(db_tag).map_err(RepositoryError::from))
    }
}

impl TagWriter for DieselRepository {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag> {
        let mut conn = self.conn()?;

        let db_new_tag: DbNewTag = new_tag.into();
        let db_tag = diesel::insert_into(tags::table)
            .values(&db_new_tag)
            .get_result::<DbTag>(&mut conn)?;

        Ok(Tag::try_from(db_tag)?)
    }

    fn update_tag(&self, id: TagId, updates: &UpdateTag) -> RepositoryResult<Tag> {
        let mut conn = self.conn()?;

        let changes: DbUpdateTag = updates.into();
        let db_tag = diesel::update(
            tags::table
                .filter(tags::id.eq(id.to_string()))
                .filter(tags::deleted_at.is_null()),
        )
        .set(&changes)
        .get_result::<DbTag>(&mut conn)?;

        Ok(Tag::try_from(db_tag)?)
    }

    fn delete_tag(&self, id: TagId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let id = id.to_string();
        let now = Utc::now().naive_utc();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::update(
                tags::table
                    .filter(tags::id.eq(&id))
                    .filter(tags::deleted_at.is_null()),
            )
            .set((tags::deleted_at.eq(Some(now)), tags::updated_at.eq(now)))
            .execute(conn)?;

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(project_tags::table.filter(project_tags::tag_id.eq(&id)))
                .execute(conn)?;

            Ok(())
        })
    }
}
