//! Raw SQL that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! User input is ALWAYS passed via `.bind()` parameters. Nothing here is
//! built by string concatenation with request data.

/// Shallow-merge a JSONB patch into a document body.
///
/// Binds: `$1` patch (Jsonb), `$2` new lookup key or NULL to keep the current
/// one (Nullable Text), `$3` id (Uuid), `$4` collection (Text).
///
/// # Why raw SQL?
/// Diesel has no operator for JSONB concatenation (`||`).
pub const MERGE_BODY_QUERY: &str = "UPDATE documents \
    SET body = body || $1, \
        lookup_key = COALESCE($2, lookup_key), \
        updated_at = now() \
    WHERE id = $3 AND collection = $4";

/// Add to a numeric top-level field in place, returning the new value.
/// A missing field counts as zero.
///
/// Binds: `$1` field name (Text), `$2` delta (Double), `$3` id (Uuid),
/// `$4` collection (Text).
///
/// # Why raw SQL?
/// The read and the write must be one statement so concurrent additions
/// are not lost, and Diesel has no `jsonb_set`.
pub const INCREMENT_FIELD_QUERY: &str = "UPDATE documents \
    SET body = jsonb_set(body, ARRAY[$1], to_jsonb(COALESCE((body ->> $1)::float8, 0) + $2)), \
        updated_at = now() \
    WHERE id = $3 AND collection = $4 \
    RETURNING (body ->> $1)::float8 AS value";

/// Case-insensitive substring search over named top-level string fields.
///
/// Binds: `$1` collection (Text), `$2` field names (Array<Text>), `$3` ILIKE
/// pattern (Text, already escaped with [`like_pattern`]).
///
/// # Why raw SQL?
/// Diesel can't index a JSONB column by a bound field name.
pub const SEARCH_QUERY: &str = "SELECT id, seq, collection, lookup_key, body, created_at, updated_at \
    FROM documents \
    WHERE collection = $1 \
      AND EXISTS ( \
        SELECT 1 FROM unnest($2::text[]) AS f(name) \
        WHERE documents.body ->> f.name ILIKE $3 \
      ) \
    ORDER BY lower(body ->> 'name'), seq";

/// Wrap a user-supplied needle in `%…%`, escaping LIKE metacharacters.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
