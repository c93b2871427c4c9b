use chromaquest_core::{Score, ScoreStore, parse_best};
use gloo::storage::{LocalStorage, Storage};

/// Fixed `localStorage` key for a persisted value.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// Personal best kept in `localStorage` as a plain decimal string.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalScoreStore;

impl StorageKey for LocalScoreStore {
    const KEY: &'static str = "chromaquest_pb_v1";
}

impl ScoreStore for LocalScoreStore {
    fn load_best(&self) -> Score {
        match LocalStorage::raw().get_item(Self::KEY) {
            Ok(Some(raw)) => parse_best(&raw),
            Ok(None) => 0,
            Err(err) => {
                log::warn!("failed to read best score: {:?}", err);
                0
            }
        }
    }

    fn save_best(&mut self, best: Score) {
        if let Err(err) = LocalStorage::raw().set_item(Self::KEY, &best.to_string()) {
            log::error!("failed to save best score: {:?}", err);
        }
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// `MM:SS`, minutes are not capped.
pub(crate) fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
