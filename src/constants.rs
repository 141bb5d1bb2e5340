// DOM hooks and page-level defaults for the web frontend.

// Element ids used by the auto-mount in `start`
pub const FIELD_CONTAINER_ID: &str = "animation-container";
pub const WAVEFORM_CONTAINER_ID: &str = "waveform-container";

// Theme variables on :root
pub const BG_COLOR_VAR: &str = "--color-bg";
pub const DOTS_COLOR_VAR: &str = "--color-animation-dots";
pub const WAVEFORM_COLOR_VAR: &str = "--waveform-color";

// Fallbacks when a theme variable is unset
pub const FALLBACK_BG: &str = "#000";
pub const FALLBACK_FG: &str = "#fff";

// Container data attributes (read through `dataset`, camel-cased)
pub const DATA_VARIANT: &str = "variant"; // data-variant="canonical|reciprocal"
pub const DATA_POINTS: &str = "points"; // data-points="10000"
pub const DATA_INTERACTIVE: &str = "interactive"; // data-interactive="false" disables dispersion
pub const DATA_DOTS_VAR: &str = "dotsVar"; // data-dots-var="--color-serpent-dots"
pub const DATA_SRC: &str = "src"; // data-src="/music.mp3"
pub const DATA_BASELINE: &str = "baseline"; // data-baseline="8" (css px above the bottom edge)

// Audio
pub const DEFAULT_TRACK_SRC: &str = "/music.mp3";

// Waveform
pub const DEFAULT_BASELINE_OFFSET: f64 = 8.0;
