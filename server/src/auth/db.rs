use crate::db::DbPool;
use crate::models::{NewSession, NewUser, Session, User};
use crate::schema::{sessions, users};
use chrono::{DateTime, Duration, Utc};
use diesel::dsl::{Filter, LtEq};
use diesel::prelude::*;
use uuid::Uuid;

use super::crypto::{generate_token, hash_token};
use super::verify::VerifiedIdentity;

/// Insert the user on first sign-in, refresh their profile fields afterwards.
pub fn upsert_user(
    conn: &mut PgConnection,
    identity: &VerifiedIdentity,
) -> Result<User, diesel::result::Error> {
    let new_user = NewUser {
        provider: identity.provider.as_str(),
        provider_uid: &identity.subject,
        email: identity.email.as_deref(),
        display_name: identity.display_name.as_deref(),
        photo_url: identity.photo_url.as_deref(),
    };

    diesel::insert_into(users::table)
        .values(&new_user)
        .on_conflict((users::provider, users::provider_uid))
        .do_update()
        .set((
            users::email.eq(identity.email.as_deref()),
            users::display_name.eq(identity.display_name.as_deref()),
            users::photo_url.eq(identity.photo_url.as_deref()),
            users::updated_at.eq(Utc::now()),
        ))
        .returning(User::as_returning())
        .get_result(conn)
}

pub fn create_session(
    conn: &mut PgConnection,
    user_id: Uuid,
    ttl_days: i64,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let expires_at = Utc::now() + Duration::days(ttl_days);

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

type ExpiredSessions = Filter<sessions::table, LtEq<sessions::expires_at, DateTime<Utc>>>;

fn expired_sessions(now: DateTime<Utc>) -> ExpiredSessions {
    sessions::table.filter(sessions::expires_at.le(now))
}

/// Remove every session whose expiry has passed.
pub fn delete_expired_sessions(conn: &mut PgConnection) -> Result<usize, diesel::result::Error> {
    diesel::delete(expired_sessions(Utc::now())).execute(conn)
}

pub fn delete_session(conn: &mut PgConnection, session_id: Uuid) -> Result<usize, diesel::result::Error> {
    diesel::delete(sessions::table.find(session_id)).execute(conn)
}

/// Resolve a bearer token to its live session and user.
pub async fn get_session_from_token(pool: &DbPool, token: &str) -> Option<(Session, User)> {
    let mut conn = pool.get().ok()?;
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select((Session::as_select(), User::as_select()))
        .first(&mut conn)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::pg::Pg;

    #[test]
    fn test_expired_sessions_query() {
        let sql = diesel::debug_query::<Pg, _>(&diesel::delete(expired_sessions(Utc::now())))
            .to_string();
        assert!(sql.starts_with(r#"DELETE FROM "sessions""#), "{}", sql);
        assert!(sql.contains(r#""sessions"."expires_at" <= $1"#), "{}", sql);
    }
}
