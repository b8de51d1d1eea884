//! Screens as pure functions of props

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A screen or widget in the view tree.
///
/// `Props` borrow from the store's state and carry the current time, so
/// rendering reads no clock and handling a key only produces actions.
pub trait Component<A> {
    type Props<'a>;

    /// Keys this component reacts to. Display-only parts keep the default.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
