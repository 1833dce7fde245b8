use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::ast::{declarations::Property, media::Feature};

lazy_static! {
    static ref PROPERTIES: HashSet<&'static str> = [
        "align-content", "align-items", "align-self", "animation", "animation-delay",
        "animation-direction", "animation-duration", "animation-fill-mode",
        "animation-iteration-count", "animation-name", "animation-play-state",
        "animation-timing-function", "appearance", "backface-visibility", "background",
        "background-attachment", "background-clip", "background-color", "background-image",
        "background-origin", "background-position", "background-repeat", "background-size",
        "border", "border-bottom", "border-bottom-color", "border-bottom-left-radius",
        "border-bottom-right-radius", "border-bottom-style", "border-bottom-width",
        "border-collapse", "border-color", "border-image", "border-left", "border-left-color",
        "border-left-style", "border-left-width", "border-radius", "border-right",
        "border-right-color", "border-right-style", "border-right-width", "border-spacing",
        "border-style", "border-top", "border-top-color", "border-top-left-radius",
        "border-top-right-radius", "border-top-style", "border-top-width", "border-width",
        "bottom", "box-shadow", "box-sizing", "caption-side", "clear", "clip", "color",
        "column-count", "column-gap", "columns", "content", "counter-increment",
        "counter-reset", "cursor", "direction", "display", "empty-cells", "filter", "flex",
        "flex-basis", "flex-direction", "flex-flow", "flex-grow", "flex-shrink", "flex-wrap",
        "float", "font", "font-family", "font-feature-settings", "font-size",
        "font-size-adjust", "font-stretch", "font-style", "font-variant", "font-weight", "gap",
        "grid", "grid-area", "grid-column", "grid-row", "grid-template",
        "grid-template-areas", "grid-template-columns", "grid-template-rows", "height",
        "justify-content", "left", "letter-spacing", "line-height", "list-style",
        "list-style-image", "list-style-position", "list-style-type", "margin",
        "margin-bottom", "margin-left", "margin-right", "margin-top", "max-height",
        "max-width", "min-height", "min-width", "object-fit", "opacity", "order", "orphans",
        "outline", "outline-color", "outline-offset", "outline-style", "outline-width",
        "overflow", "overflow-x", "overflow-y", "padding", "padding-bottom", "padding-left",
        "padding-right", "padding-top", "page-break-after", "page-break-before",
        "page-break-inside", "perspective", "pointer-events", "position", "quotes", "resize",
        "right", "size", "table-layout", "text-align", "text-decoration", "text-indent",
        "text-overflow", "text-shadow", "text-transform", "top", "transform",
        "transform-origin", "transition", "transition-delay", "transition-duration",
        "transition-property", "transition-timing-function", "unicode-bidi",
        "user-select", "vertical-align", "visibility", "white-space", "widows", "width",
        "will-change", "word-break", "word-spacing", "word-wrap", "z-index", "zoom",
    ]
    .into_iter()
    .collect();

    static ref FONT_DESCRIPTORS: HashSet<&'static str> = [
        "font-family", "src", "font-style", "font-weight", "font-stretch", "font-display",
        "font-variant", "font-feature-settings", "unicode-range",
    ]
    .into_iter()
    .collect();

    static ref VIEWPORT_DESCRIPTORS: HashSet<&'static str> = [
        "min-width", "max-width", "width", "min-height", "max-height", "height", "zoom",
        "min-zoom", "max-zoom", "user-zoom", "orientation",
    ]
    .into_iter()
    .collect();

    static ref MEDIA_FEATURES: HashSet<&'static str> = [
        "width", "height", "device-width", "device-height", "aspect-ratio",
        "device-aspect-ratio", "orientation", "resolution", "color", "color-index",
        "monochrome", "scan", "grid", "hover", "any-hover", "pointer", "any-pointer",
        "prefers-color-scheme", "prefers-reduced-motion", "display-mode",
        "-webkit-device-pixel-ratio", "device-pixel-ratio",
    ]
    .into_iter()
    .collect();

    static ref RANGE_FEATURES: HashSet<&'static str> = [
        "width", "height", "device-width", "device-height", "aspect-ratio",
        "device-aspect-ratio", "resolution", "color", "color-index", "monochrome",
        "-webkit-device-pixel-ratio", "device-pixel-ratio",
    ]
    .into_iter()
    .collect();
}

/// Which property table a declaration list resolves names against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySet {
    Standard,
    FontFace,
    Viewport,
}

/// Resolves property and media feature names. `None` means "unrecognised";
/// callers decide whether to fall back to an opaque placeholder.
pub trait PropertyFactory {
    fn resolve(&self, name: &str) -> Option<Property>;
    fn resolve_font_descriptor(&self, name: &str) -> Option<Property>;
    fn resolve_viewport_descriptor(&self, name: &str) -> Option<Property>;
    fn resolve_feature(&self, name: &str) -> Option<Feature>;

    fn resolve_in(&self, set: PropertySet, name: &str) -> Option<Property> {
        match set {
            PropertySet::Standard => self.resolve(name),
            PropertySet::FontFace => self.resolve_font_descriptor(name),
            PropertySet::Viewport => self.resolve_viewport_descriptor(name),
        }
    }
}

/// Built-in tables covering the common CSS 2.1/3 properties and media
/// features. Custom properties (`--*`) always resolve, keeping their case.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFactory;

fn strip_vendor_prefix(name: &str) -> &str {
    for prefix in ["-webkit-", "-moz-", "-ms-", "-o-"] {
        if let Some(stripped) = name.strip_prefix(prefix) {
            return stripped;
        }
    }
    name
}

fn lookup(table: &HashSet<&'static str>, name: &str) -> Option<Property> {
    let lower = name.to_ascii_lowercase();
    if table.contains(lower.as_str()) || table.contains(strip_vendor_prefix(&lower)) {
        Some(Property::new(lower))
    } else {
        None
    }
}

impl PropertyFactory for StandardFactory {
    fn resolve(&self, name: &str) -> Option<Property> {
        if name.starts_with("--") && name.len() > 2 {
            return Some(Property::new(name));
        }
        lookup(&PROPERTIES, name)
    }

    fn resolve_font_descriptor(&self, name: &str) -> Option<Property> {
        lookup(&FONT_DESCRIPTORS, name)
    }

    fn resolve_viewport_descriptor(&self, name: &str) -> Option<Property> {
        lookup(&VIEWPORT_DESCRIPTORS, name)
    }

    fn resolve_feature(&self, name: &str) -> Option<Feature> {
        let lower = name.to_ascii_lowercase();
        let known = MEDIA_FEATURES.contains(lower.as_str())
            || lower
                .strip_prefix("min-")
                .or_else(|| lower.strip_prefix("max-"))
                .is_some_and(|base| RANGE_FEATURES.contains(base));

        known.then(|| Feature::new(lower))
    }
}
