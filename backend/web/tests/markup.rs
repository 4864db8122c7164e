use page::content::{self, DIAGRAMS};
use portfolio_web::markup::{
    BLOG_CONTENT, BLOG_LINKS, BLOG_META, BLOG_TITLE, HEADER, HOMELAB_PURPOSE, HOMELAB_SERVICES,
    HOMELAB_TITLE, MENU_TOGGLE, MODAL_KINDS, NAV_MENU, modal_markup,
};

const INDEX: &str = include_str!("../../../public/index.html");

fn has_id(id: &str) -> bool {
    INDEX.contains(&format!("id=\"{id}\""))
}

fn has_class(selector: &str) -> bool {
    INDEX.contains(&format!("class=\"{}\"", selector.trim_start_matches('.')))
}

fn attribute_values(attribute: &str) -> Vec<&'static str> {
    let needle = format!("{attribute}=\"");

    INDEX
        .split(needle.as_str())
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect()
}

#[test]
fn every_bound_element_is_in_the_page() {
    for id in [
        MENU_TOGGLE,
        NAV_MENU,
        HOMELAB_TITLE,
        HOMELAB_PURPOSE,
        HOMELAB_SERVICES,
        BLOG_TITLE,
        BLOG_META,
        BLOG_CONTENT,
        BLOG_LINKS,
    ] {
        assert!(has_id(id), "missing #{id}");
    }
    assert!(has_class(HEADER));

    for kind in MODAL_KINDS {
        let ids = modal_markup(kind);

        assert!(has_id(ids.dialog), "missing #{}", ids.dialog);
        assert!(has_class(ids.close_button), "missing {}", ids.close_button);
        assert!(has_class(ids.cards), "missing {}", ids.cards);
    }
}

#[test]
fn every_card_has_content() {
    let nodes = attribute_values("data-node");
    let posts = attribute_values("data-post");

    assert_eq!(nodes.len(), content::HOMELAB_NODES.len());
    assert_eq!(posts.len(), content::BLOG_POSTS.len());

    for node in nodes {
        assert!(content::homelab_node(node).is_some(), "no homelab node {node}");
    }
    for post in posts {
        assert!(content::blog_post(post).is_some(), "no blog post {post}");
    }
}

#[test]
fn diagrams_are_rendered_without_scripting() {
    for diagram in DIAGRAMS {
        assert!(has_id(diagram.region), "missing #{}", diagram.region);
        assert!(INDEX.contains(diagram.text), "{} is empty", diagram.region);
    }
}
