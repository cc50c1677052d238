//! Storage key prefix construction.
//!
//! Every object key in a room is `<ownerId>/<roomId>[/<path…>]/<name>`.
//! Prefix building is pure string work with no failure mode: an empty
//! relative path is valid and yields the room root.

use uuid::Uuid;

/// The storage root of one room: the `<ownerId>/<roomId>` prefix all of the
/// room's objects live under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomRoot {
    /// The room owner.
    pub owner_id: Uuid,
    /// The room.
    pub room_id: Uuid,
}

impl RoomRoot {
    /// Create a room root.
    pub fn new(owner_id: Uuid, room_id: Uuid) -> Self {
        Self { owner_id, room_id }
    }

    /// Build the absolute prefix for a relative path inside this room.
    pub fn prefix(&self, rel_path: &str) -> String {
        let rel = rel_path.trim_matches('/');
        if rel.is_empty() {
            format!("{}/{}", self.owner_id, self.room_id)
        } else {
            format!("{}/{}/{}", self.owner_id, self.room_id, rel)
        }
    }
}

/// Append one segment to a prefix.
pub fn join(prefix: &str, segment: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_relative_path_yields_room_root() {
        let root = RoomRoot::new(Uuid::nil(), Uuid::nil());
        assert_eq!(
            root.prefix(""),
            format!("{}/{}", Uuid::nil(), Uuid::nil())
        );
    }

    #[test]
    fn relative_path_is_appended() {
        let root = RoomRoot::new(Uuid::nil(), Uuid::nil());
        assert_eq!(
            root.prefix("due-diligence/exhibits"),
            format!("{}/{}/due-diligence/exhibits", Uuid::nil(), Uuid::nil())
        );
    }

    #[test]
    fn surrounding_slashes_are_ignored() {
        let root = RoomRoot::new(Uuid::nil(), Uuid::nil());
        assert_eq!(root.prefix("/exhibits/"), root.prefix("exhibits"));
    }

    #[test]
    fn join_appends_one_segment() {
        assert_eq!(join("a/b", "c.pdf"), "a/b/c.pdf");
        assert_eq!(join("a/b/", "c.pdf"), "a/b/c.pdf");
    }
}
