use voxelsand_world::CursorMove;

/// A builder command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderAction {
    Place,
    Remove,
    Move(CursorMove),
    PreviousMaterial,
    NextMaterial,
    ResetCursor,
}

/// Map a `KeyboardEvent.key` value to a builder action.
pub fn action_for_key(key: &str) -> Option<BuilderAction> {
    let action = match key {
        "q" | "Q" => BuilderAction::Place,
        "e" | "E" => BuilderAction::Remove,
        "ArrowLeft" => BuilderAction::Move(CursorMove::Left),
        "ArrowRight" => BuilderAction::Move(CursorMove::Right),
        "ArrowUp" => BuilderAction::Move(CursorMove::Forward),
        "ArrowDown" => BuilderAction::Move(CursorMove::Back),
        "PageUp" => BuilderAction::Move(CursorMove::Up),
        "PageDown" => BuilderAction::Move(CursorMove::Down),
        "," => BuilderAction::PreviousMaterial,
        "." => BuilderAction::NextMaterial,
        "r" | "R" => BuilderAction::ResetCursor,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for_key("Q"), Some(BuilderAction::Place));
        assert_eq!(action_for_key("e"), Some(BuilderAction::Remove));
        assert_eq!(
            action_for_key("ArrowUp"),
            Some(BuilderAction::Move(CursorMove::Forward))
        );
        assert_eq!(
            action_for_key("PageDown"),
            Some(BuilderAction::Move(CursorMove::Down))
        );
        assert_eq!(action_for_key("."), Some(BuilderAction::NextMaterial));
        assert_eq!(action_for_key("x"), None);
    }
}
