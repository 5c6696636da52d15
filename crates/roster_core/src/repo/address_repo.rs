//! Address repository contract and SQLite implementation.

use crate::db::schema::require_current;
use crate::model::address::{Address, AddressId, NewAddress};
use crate::model::ResourceKind;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ADDRESS_SELECT_SQL: &str = "SELECT id, street, city, zip FROM addresses";

/// Storage contract for address records.
pub trait AddressRepository {
    /// Persists a new address and returns it with its assigned id.
    fn insert(&self, address: &NewAddress) -> RepoResult<Address>;
    fn find_by_id(&self, id: AddressId) -> RepoResult<Option<Address>>;
    fn find_all(&self) -> RepoResult<Vec<Address>>;
    fn exists_by_id(&self, id: AddressId) -> RepoResult<bool>;
    /// Overwrites every stored field of `address.id`.
    fn update(&self, address: &Address) -> RepoResult<()>;
    fn delete_by_id(&self, id: AddressId) -> RepoResult<()>;
}

/// SQLite-backed address repository.
pub struct SqliteAddressRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAddressRepository<'conn> {
    /// Constructs a repository over a connection at the current schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        require_current(conn)?;
        Ok(Self { conn })
    }
}

impl AddressRepository for SqliteAddressRepository<'_> {
    fn insert(&self, address: &NewAddress) -> RepoResult<Address> {
        address.validate()?;

        self.conn.execute(
            "INSERT INTO addresses (street, city, zip) VALUES (?1, ?2, ?3);",
            params![
                address.street.as_str(),
                address.city.as_str(),
                address.zip.as_str()
            ],
        )?;

        Ok(address.clone().into_address(self.conn.last_insert_rowid()))
    }

    fn find_by_id(&self, id: AddressId) -> RepoResult<Option<Address>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ADDRESS_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_address_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> RepoResult<Vec<Address>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ADDRESS_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut addresses = Vec::new();
        while let Some(row) = rows.next()? {
            addresses.push(parse_address_row(row)?);
        }
        Ok(addresses)
    }

    fn exists_by_id(&self, id: AddressId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM addresses WHERE id = ?1;", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn update(&self, address: &Address) -> RepoResult<()> {
        address.validate()?;

        let changed = self.conn.execute(
            "UPDATE addresses SET street = ?1, city = ?2, zip = ?3 WHERE id = ?4;",
            params![
                address.street.as_str(),
                address.city.as_str(),
                address.zip.as_str(),
                address.id
            ],
        )?;

        if changed == 0 {
            return Err(not_found(address.id));
        }
        Ok(())
    }

    fn delete_by_id(&self, id: AddressId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM addresses WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: AddressId) -> RepoError {
    RepoError::NotFound {
        kind: ResourceKind::Address,
        id,
    }
}

fn parse_address_row(row: &Row<'_>) -> RepoResult<Address> {
    let address = Address {
        id: row.get("id")?,
        street: row.get("street")?,
        city: row.get("city")?,
        zip: row.get("zip")?,
    };
    address.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "addresses row {} failed validation: {err}",
            address.id
        ))
    })?;
    Ok(address)
}
