use crate::SceneError;

/// Slots available for scene textures.
pub const MAX_TEXTURES: usize = 16;

/// Sentinel returned by `slot_or_invalid` for unknown tags. The renderer
/// treats it as "draw untextured" rather than guarding further.
pub const INVALID_SLOT: i32 = -1;

/// Registry mapping short string tags to texture slots in registration
/// order. Slot indices are stable for the process lifetime; there is no
/// eviction.
#[derive(Debug, Clone, Default)]
pub struct TextureBank {
    tags: Vec<String>,
    missing_reported: bool,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag and return its slot.
    pub fn register(&mut self, tag: &str) -> Result<u32, SceneError> {
        if self.tags.len() >= MAX_TEXTURES {
            return Err(SceneError::TextureBankFull);
        }
        if self.tags.iter().any(|t| t == tag) {
            return Err(SceneError::DuplicateTag(tag.to_owned()));
        }
        self.tags.push(tag.to_owned());
        Ok((self.tags.len() - 1) as u32)
    }

    pub fn slot(&self, tag: &str) -> Option<u32> {
        self.tags.iter().position(|t| t == tag).map(|i| i as u32)
    }

    /// Slot for `tag`, or `INVALID_SLOT` if it was never registered.
    ///
    /// The first failing lookup on this bank logs a warning; subsequent
    /// failures are suppressed by a bank-local flag so a miss inside the
    /// per-frame draw script does not flood the log.
    pub fn slot_or_invalid(&mut self, tag: &str) -> i32 {
        match self.slot(tag) {
            Some(slot) => slot as i32,
            None => {
                if !self.missing_reported {
                    self.missing_reported = true;
                    tracing::warn!(tag, "texture tag not registered, drawing untextured");
                }
                INVALID_SLOT
            }
        }
    }

    /// Whether a missing-tag warning has already been emitted.
    pub fn missing_reported(&self) -> bool {
        self.missing_reported
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_registration_order() {
        let mut bank = TextureBank::new();
        assert_eq!(bank.register("desk").unwrap(), 0);
        assert_eq!(bank.register("keyboard").unwrap(), 1);
        assert_eq!(bank.slot("desk"), Some(0));
        assert_eq!(bank.slot("keyboard"), Some(1));
    }

    #[test]
    fn duplicate_tag_rejected() {
        let mut bank = TextureBank::new();
        bank.register("desk").unwrap();
        assert!(matches!(
            bank.register("desk"),
            Err(SceneError::DuplicateTag(_))
        ));
    }

    #[test]
    fn bank_capacity_enforced() {
        let mut bank = TextureBank::new();
        for i in 0..MAX_TEXTURES {
            bank.register(&format!("tex{i}")).unwrap();
        }
        assert!(matches!(
            bank.register("one_too_many"),
            Err(SceneError::TextureBankFull)
        ));
    }

    #[test]
    fn missing_tag_returns_sentinel_and_warns_once() {
        let mut bank = TextureBank::new();
        bank.register("desk").unwrap();

        assert!(!bank.missing_reported());
        assert_eq!(bank.slot_or_invalid("nope"), INVALID_SLOT);
        assert!(bank.missing_reported());

        // The second identical failing lookup still returns the sentinel but
        // the suppression flag is already set, so no second warning fires.
        assert_eq!(bank.slot_or_invalid("nope"), INVALID_SLOT);
        assert!(bank.missing_reported());

        // Successful lookups are unaffected.
        assert_eq!(bank.slot_or_invalid("desk"), 0);
    }
}
