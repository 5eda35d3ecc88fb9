// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Tree of groups and extensions for a file type picker.

use super::filetypes::{FiletypesUtil, allows_everything};
use crate::models::token::TypeInput;
use crate::models::view::{BrowserGroupNode, BrowserTypeNode};

impl FiletypesUtil {
    /// Build the picker tree.
    ///
    /// - `only_types` restricts which extensions are offered; empty means all.
    /// - `allow_any` adds the leading "All file types" node, but only when no
    ///   restriction is in place.
    /// - `current` marks the already chosen types as selected.
    ///
    /// Named groups follow registry order and an extension appears under every
    /// group it belongs to. A group that lost members to the restriction can
    /// no longer be picked as a whole. Ungrouped extensions (except the
    /// reserved one) end up in a trailing "Other files" node. Nodes with a
    /// selected leaf start expanded, as does "Other files".
    pub fn data_for_browser(
        &self,
        only_types: impl Into<TypeInput>,
        allow_any: bool,
        current: impl Into<TypeInput>,
    ) -> Vec<BrowserGroupNode> {
        let registry = self.registry();
        let only = self.normalize(only_types);
        let current = self.normalize(current);

        let filter = (!allows_everything(&only)).then(|| self.expand(only.clone(), true, true));
        let is_allowed = |ext: &str| filter.as_ref().is_none_or(|f| f.iter().any(|e| e == ext));
        let is_current = |key: &str| current.iter().any(|c| c == key);
        let type_node = |ext: &str| BrowserTypeNode {
            key: ext.to_string(),
            name: self.extension_description(ext).to_string(),
            selected: is_current(ext),
            ext: ext.to_string(),
        };

        let mut nodes = Vec::new();

        if allow_any && only.is_empty() {
            nodes.push(BrowserGroupNode {
                key: BrowserGroupNode::ANY_KEY.to_string(),
                name: registry.labels().any.clone(),
                selectable: true,
                selected: is_current(BrowserGroupNode::ANY_KEY),
                ext: String::new(),
                expanded: false,
                types: Vec::new(),
            });
        }

        for group in registry.groups() {
            let mut selectable = true;
            let mut types = Vec::new();
            for ext in &group.extensions {
                if is_allowed(ext.as_str()) {
                    types.push(type_node(ext.as_str()));
                } else {
                    selectable = false;
                }
            }
            if types.is_empty() {
                continue;
            }
            types.sort_by(|a, b| a.key.cmp(&b.key));

            nodes.push(BrowserGroupNode {
                key: group.name.clone(),
                name: group.description.clone(),
                selectable,
                selected: is_current(group.name.as_str()),
                ext: group.extensions.join(" "),
                expanded: false,
                types,
            });
        }

        let mut others: Vec<BrowserTypeNode> = registry
            .entries()
            .iter()
            .filter(|entry| entry.groups.is_empty())
            .filter(|entry| !registry.is_reserved(&entry.extension))
            .filter(|entry| is_allowed(entry.extension.as_str()))
            .map(|entry| type_node(entry.extension.as_str()))
            .collect();
        others.sort_by(|a, b| a.key.cmp(&b.key));

        if !others.is_empty() {
            nodes.push(BrowserGroupNode {
                key: BrowserGroupNode::OTHERS_KEY.to_string(),
                name: registry.labels().others.clone(),
                selectable: false,
                selected: false,
                ext: String::new(),
                expanded: true,
                types: others,
            });
        }

        for node in &mut nodes {
            node.expanded = node.is_others() || node.types.iter().any(|t| t.selected);
        }

        nodes
    }
}

#[cfg(test)]
mod tests {
    use crate::logic::FiletypesUtil;
    use crate::models::token::TypeInput;
    use crate::models::view::BrowserGroupNode;

    fn util() -> FiletypesUtil {
        FiletypesUtil::builtin().unwrap()
    }

    fn none() -> TypeInput {
        TypeInput::default()
    }

    #[test]
    fn default_tree_is_fully_selectable_except_others() {
        let data = util().data_for_browser(none(), true, none());
        assert!(!data.is_empty());
        for group in &data {
            if !group.is_others() {
                assert!(group.selectable, "{} should be selectable", group.key);
            }
        }
    }

    // The reserved "unknown" extension is never offered.
    #[test]
    fn others_exclude_reserved_extension() {
        let data = util().data_for_browser(none(), true, none());
        let others = data.iter().find(|g| g.name == "Other files").unwrap();
        assert!(others.types.iter().all(|t| t.key != ".xxx"));
        assert!(others.types.iter().any(|t| t.key == ".xml"));
        assert!(others.expanded);
        assert!(!others.selectable);
        assert!(data.last().unwrap().is_others());
    }

    // Shared members show up under every group they belong to.
    #[test]
    fn restricted_tree_shows_overlapping_groups() {
        let data = util().data_for_browser("jpg png gif", true, ".gif");
        assert_eq!(data.len(), 3);
        assert_ne!(data[0].key, data[1].key);
        for group in &data {
            assert!(matches!(
                group.key.as_str(),
                "image" | "web_image" | "optimised_image"
            ));
            assert_eq!(group.types.len(), 3);
            assert!(!group.selectable);
            for ext in &group.types {
                assert_eq!(ext.selected, ext.key == ".gif");
            }
            assert!(group.expanded);
        }
    }

    #[test]
    fn group_restriction_keeps_supersets_and_subsets() {
        let data = util().data_for_browser("web_image", true, none());
        assert!(!data.is_empty());
        for group in &data {
            assert!(matches!(
                group.key.as_str(),
                "image" | "web_image" | "optimised_image"
            ));
        }
        let web = data.iter().find(|g| g.key == "web_image").unwrap();
        assert!(web.selectable);
        let image = data.iter().find(|g| g.key == "image").unwrap();
        assert!(!image.selectable);
    }

    #[test]
    fn any_node_comes_first_only_when_allowed() {
        let data = util().data_for_browser(none(), true, none());
        assert_eq!(data[0].key, BrowserGroupNode::ANY_KEY);
        assert_eq!(data[0].name, "All file types");

        let data = util().data_for_browser(none(), false, none());
        assert_ne!(data[0].key, BrowserGroupNode::ANY_KEY);

        let data = util().data_for_browser("*", true, none());
        assert!(data.iter().all(|g| g.key != BrowserGroupNode::ANY_KEY));
    }

    #[test]
    fn named_groups_follow_registry_order() {
        let util = util();
        let data = util.data_for_browser(none(), false, none());
        let keys: Vec<&str> = data
            .iter()
            .filter(|g| !g.is_others())
            .map(|g| g.key.as_str())
            .collect();
        let declared: Vec<&str> = util
            .registry()
            .groups()
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(keys, declared);
    }

    // Only groups holding a selection start expanded; "Other files" always does.
    #[test]
    fn selection_expands_groups() {
        let data = util().data_for_browser(none(), false, ".png");
        for group in &data {
            if group.key == "document" {
                assert!(!group.expanded);
            } else if group.is_others() {
                assert!(group.expanded);
            }
            for ext in &group.types {
                if ext.key == ".png" {
                    assert!(ext.selected);
                    assert!(group.expanded);
                }
            }
        }
    }

    #[test]
    fn selecting_a_group_marks_it() {
        let data = util().data_for_browser(none(), true, "audio *");
        // `*` in the selection collapses it to "anything".
        assert!(data[0].selected);
        assert!(data.iter().filter(|g| g.key == "audio").all(|g| !g.selected));

        let data = util().data_for_browser(none(), true, "audio");
        let audio = data.iter().find(|g| g.key == "audio").unwrap();
        assert!(audio.selected);
        // Picking the whole group selects no leaf, so it stays collapsed.
        assert!(audio.types.iter().all(|t| !t.selected));
        assert!(!audio.expanded);
        assert_eq!(audio.types[0].name, "Audio (AAC)");
    }
}
