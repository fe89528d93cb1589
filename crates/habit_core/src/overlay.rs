use crate::column::ColumnKey;
use crate::row::RowId;

/// The single menu or modal currently open on top of the board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    FilterMenu,
    SortMenu,
    Settings,
    AddColumn,
    NewRow,
    RowMenu(RowId),
    ColumnMenu(ColumnKey),
}

impl Overlay {
    pub fn toggle(&mut self, target: Overlay) {
        if *self == target {
            *self = Overlay::None;
        } else {
            *self = target;
        }
    }

    pub fn open(&mut self, target: Overlay) {
        *self = target;
    }

    pub fn dismiss(&mut self) {
        *self = Overlay::None;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Overlay::None)
    }

    pub fn is_modal(&self) -> bool {
        matches!(
            self,
            Overlay::Settings | Overlay::AddColumn | Overlay::NewRow
        )
    }

    /// Closes row or column menus whose target has disappeared.
    pub fn forget_row(&mut self, id: RowId) {
        if *self == Overlay::RowMenu(id) {
            self.dismiss();
        }
    }

    pub fn forget_column(&mut self, key: &ColumnKey) {
        if matches!(self, Overlay::ColumnMenu(open) if open == key) {
            self.dismiss();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_then_closes() {
        let mut overlay = Overlay::default();
        overlay.toggle(Overlay::FilterMenu);
        assert_eq!(overlay, Overlay::FilterMenu);
        overlay.toggle(Overlay::FilterMenu);
        assert_eq!(overlay, Overlay::None);
    }

    #[test]
    fn opening_one_closes_the_other() {
        let mut overlay = Overlay::FilterMenu;
        overlay.toggle(Overlay::SortMenu);
        assert_eq!(overlay, Overlay::SortMenu);
        overlay.open(Overlay::Settings);
        assert!(overlay.is_modal());
        overlay.dismiss();
        assert!(!overlay.is_open());
    }

    #[test]
    fn forget_only_matches_the_same_target() {
        let mut overlay = Overlay::ColumnMenu("sleep".into());
        overlay.forget_column(&"study".into());
        assert!(overlay.is_open());
        overlay.forget_column(&"sleep".into());
        assert!(!overlay.is_open());
    }
}
