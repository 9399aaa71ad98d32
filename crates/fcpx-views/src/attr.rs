//! Attribute names used by the view layer, spelled exactly as they appear in
//! the interchange format.

pub const ANGLE_ID: &str = "angleID";
pub const AUDIO_LAYOUT: &str = "audioLayout";
pub const AUDIO_RATE: &str = "audioRate";
pub const AUDIO_ROLE: &str = "audioRole";
pub const AUDIO_CHANNELS: &str = "audioChannels";
pub const AUX_VALUE: &str = "auxValue";
pub const COLOR_PROCESSING: &str = "colorProcessing";
pub const COLOR_SPACE: &str = "colorSpace";
pub const COMPLETED: &str = "completed";
pub const CONTENT_SYNC_OFFSET: &str = "contentSyncOffset";
pub const DURATION: &str = "duration";
pub const ENABLED: &str = "enabled";
pub const FORMAT: &str = "format";
pub const FRAME_DURATION: &str = "frameDuration";
pub const HAS_AUDIO: &str = "hasAudio";
pub const HAS_VIDEO: &str = "hasVideo";
pub const HEIGHT: &str = "height";
pub const HERO_EYE: &str = "heroEye";
pub const HERO_EYE_OVERRIDE: &str = "heroEyeOverride";
pub const ID: &str = "id";
pub const INTERP: &str = "interp";
pub const KEY: &str = "key";
pub const KIND: &str = "kind";
pub const LANE: &str = "lane";
pub const LOCATION: &str = "location";
pub const MOD_DATE: &str = "modDate";
pub const NAME: &str = "name";
pub const OFFSET: &str = "offset";
pub const POSTER_OFFSET: &str = "posterOffset";
pub const REF: &str = "ref";
pub const ROLE: &str = "role";
pub const SCALE_ENABLED: &str = "scaleEnabled";
pub const SIG: &str = "sig";
pub const SRC: &str = "src";
pub const SRC_FRAME_RATE: &str = "srcFrameRate";
pub const START: &str = "start";
pub const TC_FORMAT: &str = "tcFormat";
pub const TIME: &str = "time";
pub const TC_START: &str = "tcStart";
pub const UID: &str = "uid";
pub const VALUE: &str = "value";
pub const WIDTH: &str = "width";
