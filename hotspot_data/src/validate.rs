use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a WorldDef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a WorldDef.
///
/// Every problem found is reported, not just the first one.
///
/// ```
/// use hotspot_data::{ExitDef, RoomDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     start_room: "village".into(),
///     rooms: vec![
///         RoomDef {
///             id: "village".into(),
///             name: "Village".into(),
///             background: "img/village.png".into(),
///             exit_left: None,
///             exit_right: None,
///         },
///         RoomDef {
///             id: "house".into(),
///             name: "House".into(),
///             background: "img/house.png".into(),
///             exit_left: Some(ExitDef { to: "village".into(), label: "Go outside".into() }),
///             exit_right: None,
///         },
///     ],
///     items: Vec::new(),
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut rooms = HashSet::new();
    let mut items = HashSet::new();

    track_ids("room", world.rooms.iter().map(|r| r.id.as_str()), &mut rooms, &mut errors);
    track_ids("item", world.items.iter().map(|i| i.id.as_str()), &mut items, &mut errors);

    if world.start_room.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "start room missing".to_string(),
        });
    } else {
        check_ref("room", &world.start_room, &rooms, "start room".to_string(), &mut errors);
    }

    for room in &world.rooms {
        if room.background.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("room '{}' has no background image", room.id),
            });
        }
        for (side, exit) in [("left", &room.exit_left), ("right", &room.exit_right)] {
            if let Some(exit) = exit {
                check_ref(
                    "room",
                    &exit.to,
                    &rooms,
                    format!("room '{}' {side} exit", room.id),
                    &mut errors,
                );
            }
        }
    }

    for item in &world.items {
        if item.image.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("item '{}' has no image", item.id),
            });
        }
        if let Some(dest) = &item.enter {
            check_ref("room", dest, &rooms, format!("item '{}' enter", item.id), &mut errors);
        }
        if let LocationDef::Room(room) = &item.location {
            check_ref("room", room, &rooms, format!("item '{}' location", item.id), &mut errors);
        }
    }

    errors
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !set.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(kind: &'static str, id: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str) -> RoomDef {
        RoomDef {
            id: id.to_string(),
            name: format!("Room {id}"),
            background: format!("img/{id}.png"),
            exit_left: None,
            exit_right: None,
        }
    }

    fn item_in_room(id: &str, room_id: &str) -> ItemDef {
        ItemDef {
            id: id.to_string(),
            name: format!("Item {id}"),
            image: format!("img/{id}.png"),
            topleft: (10.0, 10.0),
            description: None,
            take_allow: true,
            take_attempt: None,
            manipulate_allow: false,
            manipulate_attempt: None,
            enter: None,
            location: LocationDef::Room(room_id.to_string()),
        }
    }

    fn base_world() -> WorldDef {
        WorldDef {
            start_room: "start".into(),
            rooms: vec![room("start")],
            items: Vec::new(),
        }
    }

    #[test]
    fn valid_world_has_no_errors() {
        let mut world = base_world();
        world.items = vec![item_in_room("lantern", "start")];
        assert!(validate_world(&world).is_empty());
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let mut world = base_world();
        world.rooms = vec![room("start"), room("start")];

        let errors = validate_world(&world);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::DuplicateId { kind, id } if *kind == "room" && id == "start"))
        );
    }

    #[test]
    fn missing_references_are_reported() {
        let mut world = base_world();
        world.items = vec![item_in_room("lantern", "missing_room")];

        let errors = validate_world(&world);
        assert!(errors.iter().any(|err| matches!(err, ValidationError::MissingReference { kind, id, .. } if *kind == "room" && id == "missing_room")));
    }

    #[test]
    fn exits_and_enter_targets_are_checked() {
        let mut world = base_world();
        world.rooms[0].exit_right = Some(ExitDef {
            to: "nowhere".into(),
            label: "Go away".into(),
        });
        let mut door = item_in_room("door", "start");
        door.enter = Some("cellar".into());
        world.items = vec![door];

        let errors = validate_world(&world);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|err| err.to_string().contains("right exit")));
        assert!(errors.iter().any(|err| err.to_string().contains("'cellar'")));
    }

    #[test]
    fn blank_start_room_is_invalid() {
        let mut world = base_world();
        world.start_room = "  ".into();

        let errors = validate_world(&world);
        assert!(matches!(errors.as_slice(), [ValidationError::InvalidValue { .. }]));
    }

    #[test]
    fn item_defaults_follow_authoring_conventions() {
        let text = r#"(id: "bird", name: "Bird", image: "img/bird.png", topleft: (300.0, 100.0))"#;
        let item: ItemDef = ron::from_str(text).unwrap();
        assert!(item.take_allow);
        assert!(!item.manipulate_allow);
        assert_eq!(item.location, LocationDef::Nowhere);
    }
}
