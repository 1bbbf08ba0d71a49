use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Duplicate,
    Delete,
}

/// Where a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A field on the canvas.
    Field(Uuid),
    /// A button of the action toolbar.
    Toolbar(ToolbarAction),
    /// Anywhere inside the property panel.
    PropertyPanel,
    /// Outside both the canvas and the property panel.
    Outside,
}

/// Result of feeding a click to the selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(Uuid),
    Cleared,
    Unchanged,
}

/// The duplicate/delete toolbar, shown immediately before `anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionToolbar {
    pub visible: bool,
    pub anchor: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selection: Selection,
    toolbar: ActionToolbar,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_click(&mut self, target: ClickTarget) -> SelectionChange {
        match target {
            ClickTarget::Field(id) => {
                self.select(id);
                SelectionChange::Selected(id)
            }
            // Toolbar buttons act on the selection; panel inputs edit it.
            ClickTarget::Toolbar(_) | ClickTarget::PropertyPanel => SelectionChange::Unchanged,
            ClickTarget::Outside => {
                self.clear();
                SelectionChange::Cleared
            }
        }
    }

    pub fn select(&mut self, id: Uuid) {
        tracing::debug!(%id, "field selected");
        self.selection = Selection::Selected(id);
        self.show_toolbar_before(id);
    }

    pub fn clear(&mut self) {
        if let Selection::Selected(id) = self.selection {
            tracing::debug!(%id, "selection cleared");
        }
        self.selection = Selection::Unselected;
        self.toolbar = ActionToolbar::default();
    }

    pub fn show_toolbar_before(&mut self, id: Uuid) {
        self.toolbar = ActionToolbar {
            visible: true,
            anchor: Some(id),
        };
    }

    pub fn state(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<Uuid> {
        match self.selection {
            Selection::Selected(id) => Some(id),
            Selection::Unselected => None,
        }
    }

    /// Highlighting follows the selection, so at most one field is highlighted.
    pub fn is_highlighted(&self, id: Uuid) -> bool {
        self.selected() == Some(id)
    }

    pub fn highlighted(&self) -> Option<Uuid> {
        self.selected()
    }

    pub fn toolbar(&self) -> ActionToolbar {
        self.toolbar
    }
}
