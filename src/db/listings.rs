// src/db/listings.rs
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::connection::Database;
use crate::domain::{
    Geometry, Listing, ListingDetail, ListingId, ReviewView, StoredImage, User,
};
use crate::errors::ServerError;

/// Persistence operations the listing workflow relies on.
pub trait ListingStore: Send + Sync {
    fn find_all(&self) -> Result<Vec<Listing>, ServerError>;
    fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ServerError>;
    /// Like `find_by_id`, with owner, reviews and review authors resolved.
    fn find_detail(&self, id: &ListingId) -> Result<Option<ListingDetail>, ServerError>;
    fn create(&self, listing: Listing) -> Result<Listing, ServerError>;
    fn save(&self, listing: &Listing) -> Result<(), ServerError>;
    /// Idempotent: deleting an unknown id is not an error.
    fn delete_by_id(&self, id: &ListingId) -> Result<(), ServerError>;
}

impl ToSql for ListingId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for ListingId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_str()?;
        Uuid::parse_str(raw)
            .map(ListingId::from)
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

const LISTING_COLUMNS: &str = "l.id, l.title, l.description, l.price, l.location, l.country, \
     l.geometry_type, l.lon, l.lat, l.image_url, l.image_filename, l.owner_id";

fn row_to_listing(row: &Row<'_>) -> rusqlite::Result<Listing> {
    Ok(Listing {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        location: row.get(4)?,
        country: row.get(5)?,
        geometry: Geometry {
            kind: row.get(6)?,
            coordinates: [row.get(7)?, row.get(8)?],
        },
        image: StoredImage {
            url: row.get(9)?,
            filename: row.get(10)?,
        },
        owner: row.get(11)?,
    })
}

pub fn insert_listing(conn: &Connection, listing: &Listing) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into listings (
            id, title, description, price, location, country,
            geometry_type, lon, lat, image_url, image_filename, owner_id
        ) values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        "#,
        params![
            listing.id,
            listing.title,
            listing.description,
            listing.price,
            listing.location,
            listing.country,
            listing.geometry.kind,
            listing.geometry.lon(),
            listing.geometry.lat(),
            listing.image.url,
            listing.image.filename,
            listing.owner,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert listing failed: {e}")))?;
    Ok(())
}

/// Whole-document write. Owner is never touched.
pub fn update_listing(conn: &Connection, listing: &Listing) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            r#"
            update listings set
                title = ?2, description = ?3, price = ?4, location = ?5, country = ?6,
                geometry_type = ?7, lon = ?8, lat = ?9,
                image_url = ?10, image_filename = ?11
            where id = ?1
            "#,
            params![
                listing.id,
                listing.title,
                listing.description,
                listing.price,
                listing.location,
                listing.country,
                listing.geometry.kind,
                listing.geometry.lon(),
                listing.geometry.lat(),
                listing.image.url,
                listing.image.filename,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update listing failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn get_listing(conn: &Connection, id: &ListingId) -> Result<Option<Listing>, ServerError> {
    conn.query_row(
        &format!("select {LISTING_COLUMNS} from listings l where l.id = ?"),
        params![id],
        row_to_listing,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select listing failed: {e}")))
}

pub fn list_listings(conn: &Connection) -> Result<Vec<Listing>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "select {LISTING_COLUMNS} from listings l order by l.rowid"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], row_to_listing)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

pub fn get_listing_detail(
    conn: &Connection,
    id: &ListingId,
) -> Result<Option<ListingDetail>, ServerError> {
    let head = conn
        .query_row(
            &format!(
                "select {LISTING_COLUMNS}, u.username, u.email \
                 from listings l join users u on u.id = l.owner_id \
                 where l.id = ?"
            ),
            params![id],
            |row| {
                let listing = row_to_listing(row)?;
                let owner = User {
                    id: listing.owner,
                    username: row.get(12)?,
                    email: row.get(13)?,
                };
                Ok((listing, owner))
            },
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("select listing detail failed: {e}")))?;

    let Some((listing, owner)) = head else {
        return Ok(None);
    };

    let mut stmt = conn
        .prepare(
            r#"
            select r.id, r.rating, r.comment, r.created_at, u.username
            from reviews r
            join users u on u.id = r.author_id
            where r.listing_id = ?
            order by r.created_at, r.id
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![id], |r| {
            Ok(ReviewView {
                id: r.get(0)?,
                rating: r.get(1)?,
                comment: r.get(2)?,
                created_at: r.get(3)?,
                author: r.get(4)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut reviews = Vec::new();
    for r in rows {
        reviews.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }

    Ok(Some(ListingDetail {
        listing,
        owner,
        reviews,
    }))
}

/// Removes the listing and its reviews in one transaction.
pub fn delete_listing(conn: &mut Connection, id: &ListingId) -> Result<(), ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    tx.execute("delete from reviews where listing_id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete reviews failed: {e}")))?;
    tx.execute("delete from listings where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete listing failed: {e}")))?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;
    Ok(())
}

/// `ListingStore` backed by the per-thread SQLite connection.
#[derive(Debug, Clone)]
pub struct SqliteListingStore {
    db: Database,
}

impl SqliteListingStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl ListingStore for SqliteListingStore {
    fn find_all(&self) -> Result<Vec<Listing>, ServerError> {
        self.db.with_conn(|conn| list_listings(conn))
    }

    fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ServerError> {
        self.db.with_conn(|conn| get_listing(conn, id))
    }

    fn find_detail(&self, id: &ListingId) -> Result<Option<ListingDetail>, ServerError> {
        self.db.with_conn(|conn| get_listing_detail(conn, id))
    }

    fn create(&self, listing: Listing) -> Result<Listing, ServerError> {
        self.db.with_conn(|conn| insert_listing(conn, &listing))?;
        Ok(listing)
    }

    fn save(&self, listing: &Listing) -> Result<(), ServerError> {
        self.db.with_conn(|conn| update_listing(conn, listing))
    }

    fn delete_by_id(&self, id: &ListingId) -> Result<(), ServerError> {
        self.db.with_conn(|conn| delete_listing(conn, id))
    }
}
