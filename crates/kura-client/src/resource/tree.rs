//! Reassembles a flat multistatus entry list into a root-plus-children
//! view.

use serde::{Deserialize, Serialize};

use super::Resource;

/// One request's resources: the entry for the requested path plus its
/// descendants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSet {
    pub root: Resource,
    pub children: Vec<Resource>,
}

impl ResourceSet {
    /// ## Summary
    /// Builds the root/children view from one response's resources.
    ///
    /// Entries whose last path segment starts with `.` are excluded.
    /// The rest are stably sorted by ascending path depth: the shallowest
    /// entry is the requested resource itself, and the stable sort keeps
    /// the server's sibling ordering intact among entries of equal depth.
    ///
    /// Returns `None` when nothing is left after the dotfile exclusion;
    /// an empty tree means "resource not found" and must not be an
    /// invented root.
    #[must_use]
    pub fn build(resources: Vec<Resource>) -> Option<Self> {
        let mut kept: Vec<Resource> = resources.into_iter().filter(|r| !is_dotfile(r)).collect();
        if kept.is_empty() {
            tracing::debug!("No resources left after dotfile exclusion");
            return None;
        }

        kept.sort_by_key(|resource| resource.pathlist.len());

        let mut iter = kept.into_iter();
        let root = iter.next()?;
        Some(Self {
            root,
            children: iter.collect(),
        })
    }
}

fn is_dotfile(resource: &Resource) -> bool {
    resource
        .pathlist
        .last()
        .is_some_and(|segment| segment.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(href: &str) -> Resource {
        Resource::for_path(href)
    }

    #[test]
    fn shallowest_entry_becomes_root() {
        let set = ResourceSet::build(vec![
            resource("/dav/docs/a.txt"),
            resource("/dav/"),
            resource("/dav/docs/"),
        ])
        .unwrap();
        assert_eq!(set.root.href, "/dav/");
        assert_eq!(set.children.len(), 2);
    }

    #[test]
    fn stable_sort_preserves_input_order_among_equal_depths() {
        // Input deliberately out of order: depth 3, depth 1, depth 2.
        let set = ResourceSet::build(vec![
            resource("/a/b/c.txt"),
            resource("/a/"),
            resource("/a/b/"),
        ])
        .unwrap();
        assert_eq!(set.root.href, "/a/");
        // After the stable sort the remaining entries keep ascending
        // depth; the depth-3 input entry stays behind the depth-2 one.
        assert_eq!(set.children[0].href, "/a/b/");
        assert_eq!(set.children[1].href, "/a/b/c.txt");
    }

    #[test]
    fn siblings_keep_server_order() {
        let set = ResourceSet::build(vec![
            resource("/dav/"),
            resource("/dav/zebra.txt"),
            resource("/dav/apple.txt"),
            resource("/dav/mango.txt"),
        ])
        .unwrap();
        let names: Vec<&str> = set.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zebra.txt", "apple.txt", "mango.txt"]);
    }

    #[test]
    fn dotfiles_are_excluded() {
        let set = ResourceSet::build(vec![
            resource("/dav/"),
            resource("/dav/.DS_Store"),
            resource("/dav/.hidden/"),
            resource("/dav/kept.txt"),
        ])
        .unwrap();
        assert_eq!(set.children.len(), 1);
        assert_eq!(set.children[0].name, "kept.txt");
    }

    #[test]
    fn empty_input_is_none() {
        assert!(ResourceSet::build(vec![]).is_none());
        assert!(ResourceSet::build(vec![resource("/dav/.only-dotfile")]).is_none());
    }
}
