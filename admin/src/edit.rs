//! Edit-form dirty tracking.

/// Holds the values a form was opened with next to the values being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm<T> {
    initial: T,
    current: T,
}

impl<T: PartialEq + Clone> EditForm<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial.clone(),
            initial,
        }
    }

    pub fn initial(&self) -> &T {
        &self.initial
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut T {
        &mut self.current
    }

    pub fn set(&mut self, value: T) {
        self.current = value;
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.initial
    }

    /// Submit is offered only for a changed form with no write in flight.
    pub fn can_submit(&self, busy: bool) -> bool {
        self.is_dirty() && !busy
    }

    /// Drop the edits.
    pub fn revert(&mut self) {
        self.current = self.initial.clone();
    }

    /// Accept the current values as the new baseline, after a confirmed save.
    pub fn commit(&mut self) {
        self.initial = self.current.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ElectionForm;

    fn form() -> EditForm<ElectionForm> {
        EditForm::new(ElectionForm {
            name: "Board".into(),
            description: "Annual board election".into(),
        })
    }

    #[test]
    fn clean_form_cannot_submit() {
        let f = form();
        assert!(!f.is_dirty());
        assert!(!f.can_submit(false));
    }

    #[test]
    fn edit_then_restore_is_clean_again() {
        let mut f = form();
        f.current_mut().name = "Council".into();
        assert!(f.is_dirty());
        assert!(f.can_submit(false));
        assert!(!f.can_submit(true));

        f.current_mut().name = "Board".into();
        assert!(!f.is_dirty());
    }

    #[test]
    fn commit_moves_baseline() {
        let mut f = form();
        f.current_mut().description = "Mid-term board election".into();
        f.commit();
        assert!(!f.is_dirty());
        assert_eq!(f.initial().description, "Mid-term board election");

        f.current_mut().name = "X".into();
        f.revert();
        assert_eq!(f.current().name, "Board");
    }
}
