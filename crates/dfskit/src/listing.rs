//! Directory listing report formatting

use chrono::{DateTime, Utc};

use crate::fs::{FileKind, FileStatus};

/// Format one listing line: permission string, owner, group, modification
/// timestamp, and the entry's path relative to the configured root.
pub(crate) fn format_status(status: &FileStatus) -> String {
    format!(
        "{} {} {} {} {}\n",
        perm_string(status.kind, status.mode),
        status.owner,
        status.group,
        format_mtime(status.modified),
        status.path,
    )
}

fn perm_string(kind: FileKind, mode: u32) -> String {
    let kind_char = match kind {
        FileKind::Directory => 'd',
        FileKind::File => '-',
    };

    format!(
        "{}{}{}{}{}{}{}{}{}{}",
        kind_char,
        if mode & 0o400 != 0 { 'r' } else { '-' },
        if mode & 0o200 != 0 { 'w' } else { '-' },
        if mode & 0o100 != 0 { 'x' } else { '-' },
        if mode & 0o040 != 0 { 'r' } else { '-' },
        if mode & 0o020 != 0 { 'w' } else { '-' },
        if mode & 0o010 != 0 { 'x' } else { '-' },
        if mode & 0o004 != 0 { 'r' } else { '-' },
        if mode & 0o002 != 0 { 'w' } else { '-' },
        if mode & 0o001 != 0 { 'x' } else { '-' },
    )
}

fn format_mtime(modified: std::time::SystemTime) -> String {
    let datetime: DateTime<Utc> = modified.into();
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}
