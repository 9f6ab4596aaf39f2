/// Navigation through the image list
///
/// Moving forward is a two-step transition so the export happens in a
/// visible state of its own:
///
/// `Viewing(i) --begin_next--> Exporting(i) --finish_export--> Viewing(i + 1)`
///
/// At the last index `begin_next` does nothing, so the final image is never
/// exported by navigation. Moving backward never exports.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// No images loaded
    Empty,
    Viewing(usize),
    Exporting(usize),
}

/// What the caller has to do after asking to move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Export image `index`, then call `finish_export` (or `abort_export`)
    Export(usize),
    /// Already at the last image; nothing happens
    AtLastImage,
    /// Nothing to navigate
    NoImages,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    count: usize,
    state: NavState,
}

impl Navigator {
    /// Start at the first image, or `Empty` when `count` is zero
    pub fn new(count: usize) -> Self {
        let state = if count == 0 {
            NavState::Empty
        } else {
            NavState::Viewing(0)
        };
        Self { count, state }
    }

    #[cfg(test)]
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Index of the image on screen
    pub fn current(&self) -> Option<usize> {
        match self.state {
            NavState::Empty => None,
            NavState::Viewing(i) | NavState::Exporting(i) => Some(i),
        }
    }

    /// Step back one image. Returns the new index if it moved.
    pub fn previous(&mut self) -> Option<usize> {
        match self.state {
            NavState::Viewing(i) if i > 0 => {
                self.state = NavState::Viewing(i - 1);
                Some(i - 1)
            }
            _ => None,
        }
    }

    /// Request a forward move; enters `Exporting(i)` unless at the end
    pub fn begin_next(&mut self) -> NextStep {
        match self.state {
            NavState::Empty => NextStep::NoImages,
            NavState::Viewing(i) if i + 1 < self.count => {
                self.state = NavState::Exporting(i);
                NextStep::Export(i)
            }
            NavState::Viewing(_) => NextStep::AtLastImage,
            // A second request while exporting keeps the pending export
            NavState::Exporting(i) => NextStep::Export(i),
        }
    }

    /// Export succeeded: show the next image. Returns its index.
    pub fn finish_export(&mut self) -> Option<usize> {
        match self.state {
            NavState::Exporting(i) => {
                self.state = NavState::Viewing(i + 1);
                Some(i + 1)
            }
            _ => None,
        }
    }

    /// Export failed: stay on the same image
    pub fn abort_export(&mut self) {
        if let NavState::Exporting(i) = self.state {
            self.state = NavState::Viewing(i);
        }
    }
}
