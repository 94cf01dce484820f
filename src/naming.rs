pub const IMAGESET_SUFFIX: &str = ".imageset";
pub const IMAGE_SUFFIX: &str = ".png";
pub const MANIFEST_NAME: &str = "Contents.json";
pub const DENSITY_MARKER: char = '@';

const DEFAULT_DENSITY: &str = "@1x";

/// Name of the icon an image set describes, i.e. the directory name without `.imageset`.
pub fn set_name(dir_name: &str) -> Option<&str> {
    dir_name
        .strip_suffix(IMAGESET_SUFFIX)
        .filter(|stem| !stem.is_empty())
}

pub fn is_image_name(name: &str) -> bool {
    name.ends_with(IMAGE_SUFFIX)
}

/// Returns `<base>@1x.png` for a `<base>.png` that carries no density marker yet.
pub fn density_qualified_name(name: &str) -> Option<String> {
    if name.contains(DENSITY_MARKER) {
        return None;
    }
    let base = name.strip_suffix(IMAGE_SUFFIX)?;
    Some(format!("{base}{DEFAULT_DENSITY}{IMAGE_SUFFIX}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_default_density_before_extension() {
        assert_eq!(density_qualified_name("icon.png").as_deref(), Some("icon@1x.png"));
        assert_eq!(
            density_qualified_name("app icon.v2.png").as_deref(),
            Some("app icon.v2@1x.png")
        );
    }

    #[test]
    fn only_trailing_extension_is_replaced() {
        assert_eq!(
            density_qualified_name("a.png.png").as_deref(),
            Some("a.png@1x.png")
        );
    }

    #[test]
    fn names_with_marker_or_other_extension_are_left_alone() {
        assert_eq!(density_qualified_name("icon@2x.png"), None);
        assert_eq!(density_qualified_name("icon@1x.png"), None);
        assert_eq!(density_qualified_name("me@home.png"), None);
        assert_eq!(density_qualified_name("icon.jpg"), None);
        assert_eq!(density_qualified_name("Contents.json"), None);
    }

    #[test]
    fn set_name_strips_suffix() {
        assert_eq!(set_name("Icon.imageset"), Some("Icon"));
        assert_eq!(set_name("Icon.appiconset"), None);
        assert_eq!(set_name(".imageset"), None);
    }
}
