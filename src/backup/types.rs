//! Backup record types

use std::fmt;
use time::OffsetDateTime;
use time::macros::format_description;

/// Prefix of every backup directory name
pub const BACKUP_ID_PREFIX: &str = "backup-";

/// One immutable snapshot of the active configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    /// Directory name, `backup-<unix-nanos>`; ids sort by creation time
    pub id: String,

    /// Capture time, decoded from the id (directory mtime as fallback)
    pub created_at: OffsetDateTime,
}

impl Backup {
    /// Decode the creation time embedded in a backup id
    pub(super) fn timestamp_from_id(id: &str) -> Option<OffsetDateTime> {
        let nanos: i128 = id.strip_prefix(BACKUP_ID_PREFIX)?.parse().ok()?;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
    }
}

impl fmt::Display for Backup {
    /// Renders as `<id> (<capture time>)` for listings
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
        match self.created_at.format(&format) {
            Ok(when) => write!(f, "{} ({when})", self.id),
            Err(_) => f.write_str(&self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip() {
        let now = OffsetDateTime::now_utc();
        let id = format!("{BACKUP_ID_PREFIX}{}", now.unix_timestamp_nanos());
        assert_eq!(Backup::timestamp_from_id(&id), Some(now));
    }

    #[test]
    fn test_malformed_ids_have_no_timestamp() {
        assert_eq!(Backup::timestamp_from_id("backup-"), None);
        assert_eq!(Backup::timestamp_from_id("backup-abc"), None);
        assert_eq!(Backup::timestamp_from_id("snapshot-12"), None);
    }

    #[test]
    fn test_display_includes_capture_time() {
        let backup = Backup {
            id: "backup-0".to_string(),
            created_at: OffsetDateTime::from_unix_timestamp_nanos(0).unwrap(),
        };
        assert_eq!(backup.to_string(), "backup-0 (1970-01-01 00:00:00 UTC)");
    }
}
