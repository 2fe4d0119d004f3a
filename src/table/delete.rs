//! Confirmation gate in front of destructive table operations.

use std::future::Future;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DialogError {
    #[error("no delete target is staged")]
    NotOpen,
    #[error("a delete is already in progress")]
    Pending,
}

#[derive(Debug, Error)]
pub enum ConfirmError<E> {
    #[error(transparent)]
    Dialog(#[from] DialogError),
    #[error("delete failed: {0}")]
    Action(E),
}

/// `Closed → Open → Open { confirming } → Closed`, falling back to an
/// unconfirmed `Open` with the same target when the delete fails.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteDialog<T> {
    Closed,
    Open { target: T, confirming: bool },
}

impl<T> Default for DeleteDialog<T> {
    fn default() -> Self {
        DeleteDialog::Closed
    }
}

impl<T> DeleteDialog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `target`, replacing any target that is open but not confirming.
    pub fn open(&mut self, target: T) -> Result<(), DialogError> {
        if self.is_pending() {
            return Err(DialogError::Pending);
        }
        *self = DeleteDialog::Open {
            target,
            confirming: false,
        };
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DialogError> {
        if self.is_pending() {
            return Err(DialogError::Pending);
        }
        *self = DeleteDialog::Closed;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DeleteDialog::Closed)
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            DeleteDialog::Open {
                confirming: true,
                ..
            }
        )
    }

    pub fn target(&self) -> Option<&T> {
        match self {
            DeleteDialog::Closed => None,
            DeleteDialog::Open { target, .. } => Some(target),
        }
    }

    /// Marks an open dialog as confirming and returns the staged target.
    pub fn begin_confirm(&mut self) -> Result<&T, DialogError> {
        match self {
            DeleteDialog::Closed => Err(DialogError::NotOpen),
            DeleteDialog::Open {
                confirming: true, ..
            } => Err(DialogError::Pending),
            DeleteDialog::Open { target, confirming } => {
                *confirming = true;
                Ok(&*target)
            }
        }
    }

    /// Leaves the confirming state: closes on success, reopens on failure.
    pub fn finish(&mut self, succeeded: bool) {
        if !self.is_pending() {
            return;
        }
        if succeeded {
            *self = DeleteDialog::Closed;
        } else if let DeleteDialog::Open { confirming, .. } = self {
            *confirming = false;
        }
    }

    /// Runs `action` against the staged target. `refresh` is called once
    /// after a successful delete and never after a failed one.
    pub async fn confirm<F, Fut, E, R>(
        &mut self,
        action: F,
        refresh: R,
    ) -> Result<(), ConfirmError<E>>
    where
        F: FnOnce(&T) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        R: FnOnce(),
    {
        let pending = {
            let target = self.begin_confirm()?;
            action(target)
        };
        let outcome = pending.await;
        self.finish(outcome.is_ok());

        match outcome {
            Ok(()) => {
                refresh();
                Ok(())
            }
            Err(err) => Err(ConfirmError::Action(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_closes_open_dialog() {
        let mut dialog = DeleteDialog::new();
        dialog.open("x").unwrap();
        assert!(dialog.is_open());
        assert_eq!(dialog.target(), Some(&"x"));

        dialog.cancel().unwrap();
        assert_eq!(dialog, DeleteDialog::Closed);
    }

    #[test]
    fn pending_dialog_rejects_open_and_cancel() {
        let mut dialog = DeleteDialog::new();
        dialog.open(1).unwrap();
        assert_eq!(dialog.begin_confirm(), Ok(&1));

        assert!(dialog.is_pending());
        assert_eq!(dialog.open(2), Err(DialogError::Pending));
        assert_eq!(dialog.cancel(), Err(DialogError::Pending));
        assert_eq!(dialog.begin_confirm(), Err(DialogError::Pending));
        assert_eq!(dialog.target(), Some(&1));
    }

    #[test]
    fn confirm_requires_a_target() {
        let mut dialog: DeleteDialog<i32> = DeleteDialog::new();
        assert_eq!(dialog.begin_confirm(), Err(DialogError::NotOpen));
        assert_eq!(dialog, DeleteDialog::Closed);
    }

    #[test]
    fn finish_failure_reopens_same_target() {
        let mut dialog = DeleteDialog::new();
        dialog.open("x").unwrap();
        dialog.begin_confirm().unwrap();

        dialog.finish(false);

        assert_eq!(
            dialog,
            DeleteDialog::Open {
                target: "x",
                confirming: false
            }
        );
        assert!(!dialog.is_pending());
    }

    #[test]
    fn finish_without_confirming_keeps_state() {
        let mut dialog = DeleteDialog::new();
        dialog.finish(true);
        assert_eq!(dialog, DeleteDialog::<i32>::Closed);

        dialog.open(3).unwrap();
        dialog.finish(true);
        assert_eq!(dialog.target(), Some(&3));
        assert!(!dialog.is_pending());
    }

    #[test]
    fn reopening_replaces_target() {
        let mut dialog = DeleteDialog::new();
        dialog.open(1).unwrap();
        dialog.open(2).unwrap();
        assert_eq!(dialog.target(), Some(&2));
    }
}
