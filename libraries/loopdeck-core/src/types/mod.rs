mod ids;
mod record;
mod settings;
mod slide;

pub use ids::ProjectKey;
pub use record::{DeckDraft, DeckRecord, RemoteChange, SavedVersion, DEFAULT_AUTHOR};
pub use settings::{
    AspectRatio, BuildScope, BuildStyle, FireworksIntensity, Settings, SettingsPatch,
    TransitionMode, DEFAULT_FEATURED_REPEATS, MAX_FEATURED_REPEATS,
};
pub use slide::{Slide, SlideTransition, SlideType};
