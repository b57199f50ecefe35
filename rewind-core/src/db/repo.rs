//! Database repository layer
//!
//! Query and update operations for user settings rows. There is no global
//! handle: callers construct a [`Database`] and pass it around explicitly,
//! which keeps tests hermetic and concurrent use safe.

use crate::error::{Error, Result};
use crate::types::{UsageStats, User, UserState};
use chrono_tz::Tz;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use std::sync::Mutex;

/// Database handle with connection pooling (single connection for now)
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for better concurrency
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    /// Get the underlying connection (for advanced use)
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    // ============================================
    // User operations
    // ============================================

    /// Load a user's settings row, creating it with defaults on first sight
    pub fn load_user(&self, id: i64) -> Result<User> {
        let conn = self.conn.lock().unwrap();
        let existing = conn
            .query_row("SELECT * FROM users WHERE id = ?", [id], |row| {
                Self::row_to_user(row)
            })
            .optional()?;

        match existing {
            Some(user) => Ok(user),
            None => {
                let user = User::new(id);
                conn.execute(
                    "INSERT INTO users (id, state, timezone, analyses) VALUES (?1, ?2, ?3, ?4)",
                    params![user.id, user.state.as_str(), user.timezone, user.analyses],
                )?;
                Ok(user)
            }
        }
    }

    /// Persist a user's settings row
    pub fn update_user(&self, user: &User) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE users SET state = ?2, timezone = ?3, analyses = ?4 WHERE id = ?1",
            params![user.id, user.state.as_str(), user.timezone, user.analyses],
        )?;
        Ok(())
    }

    /// The timezone used to localize this user's exports.
    ///
    /// Unknown users are created on the spot and get "UTC".
    pub fn get_timezone(&self, id: i64) -> Result<String> {
        Ok(self.load_user(id)?.timezone)
    }

    /// Marks the user as awaiting a timezone name.
    ///
    /// The transport calls this on the change-timezone command; the next
    /// message text goes to [`submit_timezone`](Self::submit_timezone).
    pub fn begin_timezone_change(&self, id: i64) -> Result<()> {
        let mut user = self.load_user(id)?;
        user.state = UserState::AwaitingTimezone;
        self.update_user(&user)
    }

    /// Applies a submitted timezone name and returns the user to idle.
    ///
    /// An unrecognized name fails with [`Error::Timezone`] and leaves the
    /// row untouched, state included, so the user can try again.
    pub fn submit_timezone(&self, id: i64, timezone: &str) -> Result<()> {
        if timezone.parse::<Tz>().is_err() {
            return Err(Error::Timezone(timezone.to_string()));
        }

        let mut user = self.load_user(id)?;
        user.timezone = timezone.to_string();
        user.state = UserState::Idle;
        self.update_user(&user)
    }

    /// Bumps the completed-analysis counter.
    ///
    /// Fire only after a successful end-to-end analysis, never on a parse
    /// failure.
    pub fn record_analysis_completed(&self, id: i64) -> Result<()> {
        let mut user = self.load_user(id)?;
        user.analyses += 1;
        self.update_user(&user)
    }

    /// Service-wide usage counters across all users
    pub fn statistics(&self) -> Result<UsageStats> {
        let conn = self.conn.lock().unwrap();
        let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        let analyses: i64 = conn.query_row(
            "SELECT COALESCE(SUM(analyses), 0) FROM users",
            [],
            |row| row.get(0),
        )?;
        Ok(UsageStats { users, analyses })
    }

    fn row_to_user(row: &Row) -> rusqlite::Result<User> {
        let state_raw: String = row.get("state")?;
        Ok(User {
            id: row.get("id")?,
            state: state_raw.parse().unwrap_or(UserState::Idle),
            timezone: row.get("timezone")?,
            analyses: row.get("analyses")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();
        db
    }

    #[test]
    fn test_load_creates_defaults() {
        let db = test_db();
        let user = db.load_user(10).unwrap();
        assert_eq!(user, User::new(10));

        // Loading again returns the same row, not a second insert
        let again = db.load_user(10).unwrap();
        assert_eq!(again, user);
        assert_eq!(db.statistics().unwrap().users, 1);
    }

    #[test]
    fn test_timezone_defaults_to_utc() {
        let db = test_db();
        assert_eq!(db.get_timezone(99).unwrap(), "UTC");
    }

    #[test]
    fn test_timezone_change_flow() {
        let db = test_db();

        db.begin_timezone_change(10).unwrap();
        assert_eq!(db.load_user(10).unwrap().state, UserState::AwaitingTimezone);

        db.submit_timezone(10, "Europe/Vienna").unwrap();
        let user = db.load_user(10).unwrap();
        assert_eq!(user.state, UserState::Idle);
        assert_eq!(user.timezone, "Europe/Vienna");
    }

    #[test]
    fn test_bad_timezone_leaves_row_untouched() {
        let db = test_db();
        db.begin_timezone_change(10).unwrap();

        let err = db.submit_timezone(10, "Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, Error::Timezone(_)));

        // Still waiting for a usable answer
        let user = db.load_user(10).unwrap();
        assert_eq!(user.state, UserState::AwaitingTimezone);
        assert_eq!(user.timezone, "UTC");
    }

    #[test]
    fn test_analysis_counter() {
        let db = test_db();
        db.record_analysis_completed(10).unwrap();
        db.record_analysis_completed(10).unwrap();
        db.record_analysis_completed(11).unwrap();

        assert_eq!(db.load_user(10).unwrap().analyses, 2);
        let stats = db.statistics().unwrap();
        assert_eq!(stats.users, 2);
        assert_eq!(stats.analyses, 3);
    }

    #[test]
    fn test_statistics_on_empty_store() {
        let db = test_db();
        let stats = db.statistics().unwrap();
        assert_eq!(stats.users, 0);
        assert_eq!(stats.analyses, 0);
    }
}
