use crate::consts;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::path::PathBuf;

/// Name of the directory used for this program's files within the user's
/// local config & data directories
const APP_DIR: &str = "gridsnake";

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`, shrunk if `area`
/// is too small
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Return the default path at which high scores are stored
pub(crate) fn high_scores_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(APP_DIR).join("highscores.json"))
}

/// Return the default path to which logs are written
pub(crate) fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(APP_DIR).join("gridsnake.log"))
}

/// Return the default path of the configuration file
pub(crate) fn config_file_path() -> Option<PathBuf> {
    dirs::config_local_dir().map(|p| p.join(APP_DIR).join("config.toml"))
}

/// Extra methods for stepping through the variants of a fieldless enum
pub(crate) trait EnumExt: Enum + Sized {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH.saturating_sub(1))
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}
