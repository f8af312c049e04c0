//! Project persistence, including the transactional project/tag sync.

use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::project::{NewProject, Project, UpdateProject};
use crate::domain::tag::Tag;
use crate::domain::types::ProjectId;
use crate::models::project::{
    NewProject as DbNewProject, Project as DbProject, ProjectTag as DbProjectTag,
    UpdateProject as DbUpdateProject,
};
use crate::models::tag::Tag as DbTag;
use crate::pagination::{Paginated, Sort, SortDirection, paginate};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, PROJECT_SORT_COLUMNS, ProjectListQuery, ProjectReader, ProjectScope,
    ProjectWriter,
};
use crate::schema::{logs, project_tags, projects, tags};

fn scoped(scope: ProjectScope) -> projects::BoxedQuery<'static, Sqlite> {
    let query = projects::table
        .filter(projects::deleted_at.is_null())
        .into_boxed::<Sqlite>();

    match scope {
        ProjectScope::VisibleTo(viewer) => query.filter(
            projects::is_public
                .eq(true)
                .or(projects::user_id.eq(viewer.to_string())),
        ),
        ProjectScope::OwnedBy(owner) => query.filter(projects::user_id.eq(owner.to_string())),
        ProjectScope::PublicOf(owner) => query
            .filter(projects::user_id.eq(owner.to_string()))
            .filter(projects::is_public.eq(true)),
    }
}

fn order_projects(
    query: projects::BoxedQuery<'static, Sqlite>,
    sort: Sort,
) -> projects::BoxedQuery<'static, Sqlite> {
    let query = match (sort.column, sort.direction) {
        ("title", SortDirection::Asc) => query.order(projects::title.asc()),
        ("title", SortDirection::Desc) => query.order(projects::title.desc()),
        ("is_public", SortDirection::Asc) => query.order(projects::is_public.asc()),
        ("is_public", SortDirection::Desc) => query.order(projects::is_public.desc()),
        ("created_at", SortDirection::Asc) => query.order(projects::created_at.asc()),
        _ => query.order(projects::created_at.desc()),
    };

    // UUIDv7 ids keep insertion order among equal sort keys.
    match sort.direction {
        SortDirection::Asc => query.then_order_by(projects::id.asc()),
        SortDirection::Desc => query.then_order_by(projects::id.desc()),
    }
}

/// Live tags of the given projects, grouped by project id.
fn load_tags(
    conn: &mut SqliteConnection,
    project_ids: &[String],
) -> QueryResult<HashMap<String, Vec<DbTag>>> {
    let rows = project_tags::table
        .inner_join(tags::table)
        .filter(project_tags::project_id.eq_any(project_ids))
        .filter(tags::deleted_at.is_null())
        .order(tags::name.asc())
        .select((project_tags::project_id, tags::all_columns))
        .load::<(String, DbTag)>(conn)?;

    let mut grouped: HashMap<String, Vec<DbTag>> = HashMap::new();
    for (project_id, tag) in rows {
        grouped.entry(project_id).or_default().push(tag);
    }
    Ok(grouped)
}

/// Inserts join rows one by one; the first failure aborts the enclosing transaction.
fn insert_edges(conn: &mut SqliteConnection, edges: &[DbProjectTag]) -> QueryResult<()> {
    for edge in edges {
        diesel::insert_into(project_tags::table)
            .values(edge)
            .execute(conn)?;
    }
    Ok(())
}

fn with_tags(db_project: DbProject, db_tags: Vec<DbTag>) -> RepositoryResult<Project> {
    let mut project = Project::try_from(db_project)?;
    project.tags = db_tags
        .into_iter()
        .map(Tag::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(project)
}

fn load_one(conn: &mut SqliteConnection, db_project: DbProject) -> RepositoryResult<Project> {
    let mut tags = load_tags(conn, std::slice::from_ref(&db_project.id))?;
    let db_tags = tags.remove(&db_project.id).unwrap_or_default();
    with_tags(db_project, db_tags)
}

impl ProjectReader for DieselRepository {
    fn get_project_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        let mut conn = self.conn()?;

        let db_project = projects::table
            .filter(projects::id.eq(id.to_string()))
            .filter(projects::deleted_at.is_null())
            .first::<DbProject>(&mut conn)
            .optional()?;

        db_project
            .map(|db_project| load_one(&mut conn, db_project))
            .transpose()
    }

    fn get_project_by_slug(&self, slug: &str) -> RepositoryResult<Option<Project>> {
        let mut conn = self.conn()?;

        let db_project = projects::table
            .filter(projects::slug.eq(slug))
            .filter(projects::deleted_at.is_null())
            .first::<DbProject>(&mut conn)
            .optional()?;

        db_project
            .map(|db_project| load_one(&mut conn, db_project))
            .transpose()
    }

    fn list_projects(&self, query: ProjectListQuery) -> RepositoryResult<Paginated<Project>> {
        let mut conn = self.conn()?;
        let scope = query.scope;

        let page = paginate(
            &mut conn,
            &query.pagination,
            PROJECT_SORT_COLUMNS,
            |conn| {
                scoped(scope)
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(RepositoryError::from)
            },
            |conn, window| {
                order_projects(scoped(scope), window.sort)
                    .offset(window.offset)
                    .limit(window.limit)
                    .load::<DbProject>(conn)
                    .map_err(RepositoryError::from)
            },
        )?;

        let ids = page
            .items
            .iter()
            .map(|db_project| db_project.id.clone())
            .collect::<Vec<_>>();
        let mut tags = load_tags(&mut conn, &ids)?;

        page.try_map(|db_project| {
            let db_tags = tags.remove(&db_project.id).unwrap_or_default();
            with_tags(db_project, db_tags)
        })
    }
}

impl ProjectWriter for DieselRepository {
    fn create_project(&self, new_project: &NewProject) -> RepositoryResult<Project> {
        let mut conn = self.conn()?;

        let db_new_project: DbNewProject = new_project.into();
        let edges = DbProjectTag::edges(new_project.id, &new_project.tag_ids);

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_project = diesel::insert_into(projects::table)
                .values(&db_new_project)
                .get_result::<DbProject>(conn)?;

            insert_edges(conn, &edges)?;

            load_one(conn, db_project)
        })
    }

    fn update_project(&self, id: ProjectId, updates: &UpdateProject) -> RepositoryResult<Project> {
        let mut conn = self.conn()?;

        let changes: DbUpdateProject = updates.into();
        let edges = DbProjectTag::edges(id, &updates.tag_ids);
        let id = id.to_string();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_project = diesel::update(
                projects::table
                    .filter(projects::id.eq(&id))
                    .filter(projects::deleted_at.is_null()),
            )
            .set(&changes)
            .get_result::<DbProject>(conn)?;

            if updates.replaces_tags() {
                diesel::delete(project_tags::table.filter(project_tags::project_id.eq(&id)))
                    .execute(conn)?;
                insert_edges(conn, &edges)?;
            }

            load_one(conn, db_project)
        })
    }

    fn delete_project(&self, id: ProjectId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let id = id.to_string();
        let now = Utc::now().naive_utc();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::update(
                projects::table
                    .filter(projects::id.eq(&id))
                    .filter(projects::deleted_at.is_null()),
            )
            .set((
                projects::deleted_at.eq(Some(now)),
                projects::updated_at.eq(now),
            ))
            .execute(conn)?;

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }

            diesel::delete(project_tags::table.filter(project_tags::project_id.eq(&id)))
                .execute(conn)?;

            diesel::update(
                logs::table
                    .filter(logs::project_id.eq(&id))
                    .filter(logs::deleted_at.is_null()),
            )
            .set(logs::deleted_at.eq(Some(now)))
            .execute(conn)?;

            Ok(())
        })
    }
}
