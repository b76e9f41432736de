//! End-to-end checks: files on disk through to rendered documents and map URLs.

use httpmock::prelude::*;
use machikado_engine::maps::{self, geocoder::DEFAULT_TIMEOUT};
use machikado_engine::{
    Block, ContentStore, DirectiveKind, MapMode, MapState, NominatimGeocoder, Route,
    render_markdown, resolve_map,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "shops/Shibuya/kissa-hitotsu.md",
        "---\nname: 喫茶ひとつ\naddress: 東京都渋谷区道玄坂1-1\nscene_tags: [ひとり]\n---\n\
         # 喫茶ひとつ\n\nVisit us! {{maps:1-1 Chiyoda, Tokyo}}\n\n[予約](tel:03-1234-5678)\n",
    );
    write(
        dir.path(),
        "shops/Shibuya/broken.md",
        "---\nname: [not closed\n---\n",
    );
    write(dir.path(), "shops/Asakusa/.keep", "");
    write(
        dir.path(),
        "posts/hello.md",
        "---\ntitle: はじめまして\ndate: 2024-01-15\n---\n```rust\nfn main() {}\n```\n",
    );
    dir
}

#[test]
fn shop_page_renders_with_map_directive() {
    let site = sample_site();
    let store = ContentStore::open(site.path(), true).unwrap();

    assert_eq!(store.list_areas().unwrap(), vec!["Asakusa", "Shibuya"]);
    assert!(store.list_shops("Asakusa").unwrap().is_empty());

    let shops = store.list_shops("Shibuya").unwrap();
    assert_eq!(shops.len(), 1);

    let route = Route::parse("/Shibuya/kissa-hitotsu");
    let Route::Shop { area, slug } = &route else {
        panic!("expected a shop route, got {route:?}");
    };
    let shop = store.get_shop(area, slug).unwrap().unwrap();
    assert_eq!(shop.scene_tags, vec!["ひとり"]);

    let doc = render_markdown(&shop.content);
    let directives = doc.map_directives();
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0].kind, DirectiveKind::Maps);
    assert_eq!(directives[0].address, "1-1 Chiyoda, Tokyo");
    assert_eq!(MapMode::from(directives[0].kind), MapMode::Both);
    assert!(
        doc.blocks
            .iter()
            .any(|b| matches!(b, Block::Map(d) if d.address == "1-1 Chiyoda, Tokyo"))
    );
}

#[test]
fn missing_shop_is_not_an_error() {
    let site = sample_site();
    let store = ContentStore::open(site.path(), false).unwrap();

    assert_eq!(store.get_shop("Shibuya", "nonexistent").unwrap(), None);
    assert_eq!(store.get_post("nonexistent").unwrap(), None);
}

#[test]
fn post_code_block_is_highlighted() {
    let site = sample_site();
    let store = ContentStore::open(site.path(), true).unwrap();

    let posts = store.list_posts().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].route(), Route::Post("hello".to_string()));

    let doc = render_markdown(&posts[0].content);
    match doc.blocks.as_slice() {
        [Block::CodeBlock(code)] => {
            assert_eq!(code.language.as_deref(), Some("rust"));
            assert!(code.highlighted.is_some());
        }
        other => panic!("expected a single code block, got {other:?}"),
    }
}

#[tokio::test]
async fn nonsense_address_resolves_without_panorama() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("[]");
    });
    let geocoder = NominatimGeocoder::new(server.url("/search"), "Japan", DEFAULT_TIMEOUT).unwrap();

    let state = MapState::from(resolve_map("qwertyuiop", &geocoder).await);

    assert_eq!(state.map_url(), Some(maps::map_embed_url("qwertyuiop").as_str()));
    assert_eq!(state.panorama_url(), None);
}

#[tokio::test]
async fn geocoder_outage_still_yields_map_url() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(503);
    });
    let geocoder = NominatimGeocoder::new(server.url("/search"), "Japan", DEFAULT_TIMEOUT).unwrap();

    let state = MapState::from(resolve_map("渋谷駅", &geocoder).await);

    assert!(matches!(state, MapState::Failed { .. }));
    assert_eq!(state.map_url(), Some(maps::map_embed_url("渋谷駅").as_str()));
}
