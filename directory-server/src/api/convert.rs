//! Type Conversion
//!
//! Converts database models (db::models) into API response models
//! (shared::models).

use crate::db::models as db;
use shared::models as api;

// ============ Helpers ============

pub fn thing_to_string(thing: &surrealdb::sql::Thing) -> String {
    thing.to_string()
}

pub fn option_thing_to_string(thing: &Option<surrealdb::sql::Thing>) -> Option<String> {
    thing.as_ref().map(thing_to_string)
}

// ============ Category ============

impl From<db::Category> for api::Category {
    fn from(c: db::Category) -> Self {
        Self {
            id: option_thing_to_string(&c.id),
            name: c.name,
            slug: c.slug,
        }
    }
}

// ============ Tag ============

impl From<db::Tag> for api::Tag {
    fn from(t: db::Tag) -> Self {
        Self {
            id: option_thing_to_string(&t.id),
            name: t.name,
            slug: t.slug,
        }
    }
}

// ============ User ============

impl From<db::User> for api::UserRef {
    fn from(u: db::User) -> Self {
        Self {
            id: option_thing_to_string(&u.id),
            name: u.name,
            username: u.username,
            profile: u.profile,
        }
    }
}

// ============ Member ============

impl From<db::MemberExpanded> for api::Member {
    fn from(m: db::MemberExpanded) -> Self {
        Self {
            id: option_thing_to_string(&m.id),
            cname: m.cname,
            contact: m.contact,
            mobile: m.mobile,
            address: m.address,
            email: m.email,
            location: m.location,
            body: m.body,
            excerpt: m.excerpt,
            desc: m.desc,
            slug: m.slug,
            categories: m.categories.into_iter().map(Into::into).collect(),
            tags: m.tags.into_iter().map(Into::into).collect(),
            posted_by: m.posted_by.map(Into::into),
            created_at: Some(m.created_at.0.to_rfc3339()),
            updated_at: Some(m.updated_at.0.to_rfc3339()),
        }
    }
}
