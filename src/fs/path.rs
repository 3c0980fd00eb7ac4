use std::path::Path;

/// Return the suffix of `name` starting at its last `.`, dot included.
///
/// The whole string is searched, so a dot in a directory component counts
/// when there is none in the file name.
///
/// ```
/// assert_eq!(cmsfs::get_suffix("a.tar.gz"), Some(".gz"));
/// assert_eq!(cmsfs::get_suffix("noext"), None);
/// ```
pub fn get_suffix(name: &str) -> Option<&str> {
    name.rfind('.').map(|idx| &name[idx..])
}

/// Strip a literal leading `prefix` from `s`, or return `s` unchanged.
pub fn remove_prefix<'a>(s: &'a str, prefix: &str) -> &'a str {
    s.strip_prefix(prefix).unwrap_or(s)
}

/// Strip the web-root path from the front of `s`.
///
/// The root is compared as text, exactly as it is configured.
pub fn remove_root_path<'a>(s: &'a str, web_root: &Path) -> &'a str {
    remove_prefix(s, &web_root.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_suffix() {
        assert_eq!(get_suffix("a.tar.gz"), Some(".gz"));
        assert_eq!(get_suffix("photo.JPG"), Some(".JPG"));
        assert_eq!(get_suffix("trailing."), Some("."));
        assert_eq!(get_suffix(".htaccess"), Some(".htaccess"));
        assert_eq!(get_suffix("noext"), None);
        assert_eq!(get_suffix(""), None);
    }

    #[test]
    fn test_get_suffix_searches_whole_path() {
        assert_eq!(get_suffix("attachment/2016.03/upload"), Some(".03/upload"));
    }

    #[test]
    fn test_remove_prefix() {
        assert_eq!(remove_prefix("/root/a", "/root"), "/a");
        assert_eq!(remove_prefix("/x", "/root"), "/x");
        assert_eq!(remove_prefix("/root", "/root"), "");
        assert_eq!(remove_prefix("abc", ""), "abc");
    }

    #[test]
    fn test_remove_root_path() {
        let root = Path::new("/var/www/jpress");
        assert_eq!(
            remove_root_path("/var/www/jpress/attachment/logo.png", root),
            "/attachment/logo.png"
        );
        assert_eq!(remove_root_path("/tmp/logo.png", root), "/tmp/logo.png");
    }
}
