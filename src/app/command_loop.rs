use crate::commands::ViewerCommand;
use crate::profile_scope;
use crate::viewer::Viewer;
use ultraviolet::Vec2;

/// Apply one command to the viewer. Returns true when the view needs a redraw.
pub fn handle_command(cmd: ViewerCommand, viewer: &mut Viewer) -> bool {
    profile_scope!("command_handling");
    let mut state_changed = false;
    let mut mark_dirty = || state_changed = true;

    match cmd {
        ViewerCommand::PlaceCharge { x, y, polarity } => {
            if viewer.place(Vec2::new(x, y), polarity) {
                mark_dirty();
            }
        }
        ViewerCommand::ClearAll => {
            viewer.clear();
            mark_dirty();
        }
        ViewerCommand::SetParameters(params) => match params.validate() {
            Ok(()) => {
                viewer.params = params;
                mark_dirty();
            }
            Err(e) => log::warn!("rejected parameters ({})", e),
        },
        ViewerCommand::Edit(edit) => {
            let mut params = viewer.params;
            edit.apply(&mut params);
            match params.validate() {
                Ok(()) => {
                    viewer.params = params;
                    mark_dirty();
                }
                Err(e) => log::warn!("rejected {:?}: {}", edit, e),
            }
        }
        ViewerCommand::SetPlacedCharge(magnitude) => {
            // Only affects future placements
            viewer.settings.placed_charge = magnitude;
        }
        ViewerCommand::SetMode(mode) => {
            if viewer.settings.mode != mode {
                viewer.settings.mode = mode;
                mark_dirty();
            }
        }
        ViewerCommand::SetTraceFrom(polarity) => {
            if viewer.settings.trace_from != polarity {
                viewer.settings.trace_from = polarity;
                mark_dirty();
            }
        }
        ViewerCommand::SetViewport(viewport) => {
            if viewport.is_finite() {
                viewer.settings.viewport = viewport;
                mark_dirty();
            } else {
                log::warn!("rejected viewport {:?}: bounds must be finite", viewport);
            }
        }
        ViewerCommand::Probe { x, y } => {
            let segment = viewer.probe(Vec2::new(x, y));
            log::info!(
                "force at ({}, {}) drawn to ({:.3}, {:.3})",
                x,
                y,
                segment.end.x,
                segment.end.y
            );
            mark_dirty();
        }
        ViewerCommand::Refresh => {
            mark_dirty();
        }
    }

    state_changed
}

/// Apply a sequence of commands, returning how many requested a redraw.
pub fn handle_commands<I>(commands: I, viewer: &mut Viewer) -> usize
where
    I: IntoIterator<Item = ViewerCommand>,
{
    commands
        .into_iter()
        .map(|cmd| handle_command(cmd, viewer))
        .filter(|&dirty| dirty)
        .count()
}
