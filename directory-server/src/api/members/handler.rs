//! Member API Handlers
//!
//! Create and update take multipart form data (the photo rides along as a
//! binary part). Validation runs field by field in a fixed order so the
//! client always sees the first problem only.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use surrealdb::sql::Thing;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{MemberMerge, NewMember, Photo};
use crate::db::repository::{
    CategoryRepository, MemberRepository, TagRepository, UserRepository, make_thing,
    member::DEFAULT_PAGE_LIMIT, member::DEFAULT_RELATED_LIMIT,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Member as SharedMember, MembersPage, PageParams, RelatedParams,
};

/// Largest accepted photo upload in bytes
pub const MAX_PHOTO_BYTES: usize = 10_000_000;

/// Shortest accepted member body in characters
pub const MIN_BODY_CHARS: usize = 200;

const FIELD_MIN: usize = 3;
const FIELD_MAX: usize = 160;

/// Raw multipart fields before validation
#[derive(Default)]
struct MemberForm {
    cname: Option<String>,
    contact: Option<String>,
    mobile: Option<String>,
    address: Option<String>,
    email: Option<String>,
    location: Option<String>,
    body: Option<String>,
    categories: Option<String>,
    tags: Option<String>,
    photo: Option<Photo>,
}

async fn collect_form(multipart: &mut Multipart) -> AppResult<MemberForm> {
    let mut form = MemberForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "photo" {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await?;
            form.photo = Some(Photo {
                data: data.to_vec(),
                content_type,
            });
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "cname" => form.cname = Some(value),
            "contact" => form.contact = Some(value),
            "mobile" => form.mobile = Some(value),
            "address" => form.address = Some(value),
            "email" => form.email = Some(value),
            "location" => form.location = Some(value),
            "body" => form.body = Some(value),
            "categories" => form.categories = Some(value),
            "tags" => form.tags = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

/// Trim a required text field, rejecting absent/empty values with the
/// field's own message and enforcing the common length bounds.
fn required(value: &Option<String>, field: &str, message: &str) -> AppResult<String> {
    let trimmed = value.as_deref().map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return Err(AppError::validation(message));
    }
    let len = trimmed.chars().count();
    if !(FIELD_MIN..=FIELD_MAX).contains(&len) {
        return Err(AppError::validation(format!(
            "{field} must be between {FIELD_MIN} and {FIELD_MAX} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Split a comma-joined list of record references into Things.
fn split_refs(raw: &str, table: &str) -> Vec<Thing> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| make_thing(table, s))
        .collect()
}

fn check_photo(photo: &Option<Photo>) -> AppResult<()> {
    if let Some(photo) = photo {
        if photo.data.len() > MAX_PHOTO_BYTES {
            // Historical client copy; the enforced limit is 10,000,000 bytes
            return Err(AppError::validation("Image should be less then 1mb in size"));
        }
    }
    Ok(())
}

/// POST /api/member - create a member (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<SharedMember>> {
    let form = collect_form(&mut multipart).await?;

    let cname = required(&form.cname, "cname", "Company name is required")?;
    let contact = required(&form.contact, "contact", "contact is required")?;
    let mobile = required(&form.mobile, "mobile", "mobile is required")?;
    let address = required(&form.address, "address", "address is required")?;
    let email = required(&form.email, "email", "email is required")?;
    let location = required(&form.location, "location", "location is required")?;

    let body = form.body.as_deref().map(str::trim).unwrap_or("");
    if body.chars().count() < MIN_BODY_CHARS {
        return Err(AppError::validation("Content is too short"));
    }

    let categories = split_refs(form.categories.as_deref().unwrap_or(""), "category");
    if categories.is_empty() {
        return Err(AppError::validation("At least one category is required"));
    }
    let tags = split_refs(form.tags.as_deref().unwrap_or(""), "tag");
    if tags.is_empty() {
        return Err(AppError::validation("At least one tag is required"));
    }

    check_photo(&form.photo)?;

    // Keep the principal's projection current so postedBy expansion
    // always resolves
    let user_repo = UserRepository::new(state.db.clone());
    let posted_by = user_repo.upsert(&user.id, &user.name, &user.username).await?;

    let repo = MemberRepository::new(state.db.clone());
    let created = repo
        .create(NewMember {
            cname,
            contact,
            mobile,
            address,
            email,
            location,
            body: body.to_string(),
            categories,
            tags,
            posted_by,
            photo: form.photo,
        })
        .await?;

    let member = repo
        .find_by_slug_expanded(&created.slug)
        .await?
        .ok_or_else(|| AppError::not_found("Member not found after create"))?;
    Ok(Json(member.into()))
}

/// GET /api/members - list all members
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SharedMember>>> {
    let repo = MemberRepository::new(state.db.clone());
    let members = repo.find_all_expanded().await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// POST /api/members-categories-tags - one page of members plus all
/// categories and tags for the filter sidebar
pub async fn list_with_categories_tags(
    State(state): State<ServerState>,
    params: Option<Json<PageParams>>,
) -> AppResult<Json<MembersPage>> {
    let params = params.map(|Json(p)| p).unwrap_or_default();
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let skip = params.skip.unwrap_or(0);

    let members = MemberRepository::new(state.db.clone())
        .find_page_expanded(limit, skip)
        .await?;
    let categories = CategoryRepository::new(state.db.clone()).find_all().await?;
    let tags = TagRepository::new(state.db.clone()).find_all().await?;

    let members: Vec<SharedMember> = members.into_iter().map(Into::into).collect();
    let size = members.len();
    Ok(Json(MembersPage {
        members,
        categories: categories.into_iter().map(Into::into).collect(),
        tags: tags.into_iter().map(Into::into).collect(),
        size,
    }))
}

/// GET /api/member/:slug - read one member
pub async fn read(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<SharedMember>> {
    let slug = slug.to_lowercase();
    let member = MemberRepository::new(state.db.clone())
        .find_by_slug_expanded(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member '{slug}' not found")))?;
    Ok(Json(member.into()))
}

/// PUT /api/member/:slug - merge supplied fields onto a member (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<SharedMember>> {
    let slug = slug.to_lowercase();
    let form = collect_form(&mut multipart).await?;
    check_photo(&form.photo)?;

    let some_trimmed = |v: Option<String>| v.map(|s| s.trim().to_string());

    let merge = MemberMerge {
        cname: some_trimmed(form.cname),
        contact: some_trimmed(form.contact),
        mobile: some_trimmed(form.mobile),
        address: some_trimmed(form.address),
        email: some_trimmed(form.email),
        location: some_trimmed(form.location),
        // An empty body part is treated as absent so the stored body,
        // excerpt and desc are left alone
        body: some_trimmed(form.body).filter(|b| !b.is_empty()),
        categories: form.categories.as_deref().map(|c| split_refs(c, "category")),
        tags: form.tags.as_deref().map(|t| split_refs(t, "tag")),
        photo: form.photo,
    };

    let member = MemberRepository::new(state.db.clone())
        .update_by_slug(&slug, merge)
        .await?;
    Ok(Json(member.into()))
}

/// DELETE /api/member/:slug - delete a member (admin)
///
/// Always reports success, whether or not a record existed.
pub async fn remove(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let slug = slug.to_lowercase();
    MemberRepository::new(state.db.clone())
        .delete_by_slug(&slug)
        .await?;
    Ok(Json(json!({"message": "Member deleted successfully"})))
}

/// GET /api/member/photo/:slug - raw photo bytes
pub async fn photo(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let slug = slug.to_lowercase();
    let photo = MemberRepository::new(state.db.clone())
        .find_photo(&slug)
        .await?
        .ok_or_else(|| AppError::validation("Photo not available"))?;

    Ok(([(header::CONTENT_TYPE, photo.content_type)], photo.data).into_response())
}

/// POST /api/members/related - members sharing a category
pub async fn related(
    State(state): State<ServerState>,
    Json(params): Json<RelatedParams>,
) -> AppResult<Json<Vec<SharedMember>>> {
    let limit = params.limit.unwrap_or(DEFAULT_RELATED_LIMIT);
    let exclude = make_thing("member", &params.member.id);
    let categories = params
        .member
        .categories
        .iter()
        .map(|c| make_thing("category", c))
        .collect();

    let members = MemberRepository::new(state.db.clone())
        .find_related(exclude, categories, limit)
        .await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// GET /api/members/search?search=term - substring search
///
/// An absent or empty term short-circuits to an empty list without
/// touching the database.
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<SharedMember>>> {
    let term = params.search.as_deref().map(str::trim).unwrap_or("");
    if term.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let members = MemberRepository::new(state.db.clone()).search(term).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// GET /api/members/by-user/:username - one user's members
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<SharedMember>>> {
    let user = UserRepository::new(state.db.clone())
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;
    let user_id = user
        .id
        .ok_or_else(|| AppError::database("User record missing id"))?;

    let members = MemberRepository::new(state.db.clone())
        .find_by_user(user_id)
        .await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}
