//! Loading shops and posts from the content directory.
//!
//! Layout under the content root:
//!
//! ```text
//! shops/<area>/<slug>.md
//! posts/<slug>.md
//! ```
//!
//! Listings never fail because of one bad file: a file that cannot be read
//! or whose front-matter is malformed is logged and skipped.

pub mod cache;
pub mod front_matter;

use crate::models::{BlogPost, Shop};
use cache::FileCache;
use front_matter::{PostFrontMatter, ShopFrontMatter, parse_front_matter, split_front_matter};
use relative_path::{Component, RelativePath, RelativePathBuf};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SHOPS_DIR: &str = "shops";
pub const POSTS_DIR: &str = "posts";

/// Recognised content file extensions, in lookup order
pub const EXTENSIONS: [&str; 2] = ["md", "markdown"];

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed front-matter in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
    #[error("invalid content root: {}", .0.display())]
    InvalidRoot(PathBuf),
}

/// Read-only view of the content directory
#[derive(Debug)]
pub struct ContentStore {
    root: PathBuf,
    shops: FileCache<Shop>,
    posts: FileCache<BlogPost>,
}

impl ContentStore {
    /// Open the content directory at `root`.
    ///
    /// `cache` keeps parsed files in memory until their mtime changes.
    pub fn open(root: impl Into<PathBuf>, cache: bool) -> Result<Self, ContentError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ContentError::InvalidRoot(root));
        }
        log::info!("content root: {}", root.display());

        Ok(Self {
            root,
            shops: FileCache::new(cache),
            posts: FileCache::new(cache),
        })
    }

    /// Area directory names, sorted
    pub fn list_areas(&self) -> Result<Vec<String>, ContentError> {
        let shops_root = RelativePath::new(SHOPS_DIR).to_path(&self.root);
        let Some(entries) = read_dir_if_exists(&shops_root)? else {
            return Ok(Vec::new());
        };

        let mut areas: Vec<String> = entries
            .into_iter()
            .filter(|path| path.is_dir())
            .filter_map(|path| visible_name(&path))
            .collect();
        areas.sort();
        Ok(areas)
    }

    /// Shops in `area`, sorted by slug. An unknown area has no shops.
    pub fn list_shops(&self, area: &str) -> Result<Vec<Shop>, ContentError> {
        let Some(area_dir) = content_dir(&[SHOPS_DIR, area]) else {
            return Ok(Vec::new());
        };
        let files = self.content_files(&area_dir)?;

        Ok(files
            .into_iter()
            .filter_map(|(slug, path)| match self.load_shop(area, &slug, &path) {
                Ok(shop) => Some(shop),
                Err(e) => {
                    log::warn!("skipping shop {area}/{slug}: {e}");
                    None
                }
            })
            .collect())
    }

    /// One shop, or `None` when no such file exists
    pub fn get_shop(&self, area: &str, slug: &str) -> Result<Option<Shop>, ContentError> {
        let Some(area_dir) = content_dir(&[SHOPS_DIR, area]) else {
            return Ok(None);
        };
        let Some(path) = self.find_file(&area_dir, slug) else {
            return Ok(None);
        };
        absent_as_none(self.load_shop(area, slug, &path))
    }

    /// Posts, newest first; equal dates keep file-name order
    pub fn list_posts(&self) -> Result<Vec<BlogPost>, ContentError> {
        let Some(posts_dir) = content_dir(&[POSTS_DIR]) else {
            return Ok(Vec::new());
        };
        let files = self.content_files(&posts_dir)?;

        let mut posts: Vec<BlogPost> = files
            .into_iter()
            .filter_map(|(slug, path)| match self.load_post(&slug, &path) {
                Ok(post) => Some(post),
                Err(e) => {
                    log::warn!("skipping post {slug}: {e}");
                    None
                }
            })
            .collect();
        posts.sort_by(BlogPost::newest_first);
        Ok(posts)
    }

    pub fn get_post(&self, slug: &str) -> Result<Option<BlogPost>, ContentError> {
        let Some(posts_dir) = content_dir(&[POSTS_DIR]) else {
            return Ok(None);
        };
        let Some(path) = self.find_file(&posts_dir, slug) else {
            return Ok(None);
        };
        absent_as_none(self.load_post(slug, &path))
    }

    fn load_shop(&self, area: &str, slug: &str, path: &Path) -> Result<Shop, ContentError> {
        self.shops.get_or_load(path, || {
            let text = read_file(path)?;
            parse_shop(area, slug, &text).map_err(|source| ContentError::Malformed {
                path: path.to_path_buf(),
                source,
            })
        })
    }

    fn load_post(&self, slug: &str, path: &Path) -> Result<BlogPost, ContentError> {
        self.posts.get_or_load(path, || {
            let text = read_file(path)?;
            parse_post(slug, &text).map_err(|source| ContentError::Malformed {
                path: path.to_path_buf(),
                source,
            })
        })
    }

    /// First existing `<slug>.<ext>` in `dir`
    fn find_file(&self, dir: &RelativePath, slug: &str) -> Option<PathBuf> {
        valid_segment(slug)?;
        EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{slug}.{ext}")).to_path(&self.root))
            .find(|path| path.is_file())
    }

    /// `(slug, path)` for every content file in `dir`, sorted by slug.
    ///
    /// When `a.md` and `a.markdown` both exist, only the one `find_file`
    /// would pick is kept.
    fn content_files(&self, dir: &RelativePath) -> Result<Vec<(String, PathBuf)>, ContentError> {
        let Some(entries) = read_dir_if_exists(&dir.to_path(&self.root))? else {
            return Ok(Vec::new());
        };

        let mut files: Vec<(String, usize, PathBuf)> = entries
            .into_iter()
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let name = visible_name(&path)?;
                let (slug, ext) = name.rsplit_once('.')?;
                let rank = EXTENSIONS.iter().position(|known| *known == ext)?;
                valid_segment(slug)?;
                Some((slug.to_string(), rank, path))
            })
            .collect();
        files.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut unique: Vec<(String, PathBuf)> = Vec::with_capacity(files.len());
        for (slug, _, path) in files {
            if let Some((previous, kept)) = unique.last()
                && *previous == slug
            {
                log::warn!(
                    "ignoring {} because {} has the same slug",
                    path.display(),
                    kept.display()
                );
                continue;
            }
            unique.push((slug, path));
        }
        Ok(unique)
    }
}

/// Parse a shop file. `area` and `slug` come from its location.
pub fn parse_shop(area: &str, slug: &str, text: &str) -> Result<Shop, serde_yaml_ng::Error> {
    let (yaml, body) = split_front_matter(text);
    let meta: ShopFrontMatter = parse_front_matter(yaml)?;

    Ok(Shop {
        area: area.to_string(),
        slug: slug.to_string(),
        name: meta.name,
        address: meta.address,
        image: meta.image,
        description: meta.description,
        tags: meta.tags,
        price_tags: meta.price_tags,
        scene_tags: meta.scene_tags,
        access_tags: meta.access_tags,
        business_tags: meta.business_tags,
        content: body.to_string(),
    })
}

pub fn parse_post(slug: &str, text: &str) -> Result<BlogPost, serde_yaml_ng::Error> {
    let (yaml, body) = split_front_matter(text);
    let meta: PostFrontMatter = parse_front_matter(yaml)?;

    Ok(BlogPost {
        slug: slug.to_string(),
        title: meta.title,
        date: meta.date,
        excerpt: meta.excerpt,
        author: meta.author,
        tags: meta.tags,
        content: body.to_string(),
    })
}

/// A single, ordinary path segment: not empty, no separators, not `.`/`..`,
/// not hidden.
fn valid_segment(segment: &str) -> Option<&str> {
    if segment.contains('\\') || segment.starts_with('.') {
        return None;
    }
    let mut components = RelativePath::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == segment => Some(segment),
        _ => None,
    }
}

fn content_dir(segments: &[&str]) -> Option<RelativePathBuf> {
    let mut dir = RelativePathBuf::new();
    for segment in segments {
        dir.push(valid_segment(segment)?);
    }
    Some(dir)
}

fn visible_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.') {
        None
    } else {
        Some(name.to_string())
    }
}

fn read_dir_if_exists(dir: &Path) -> Result<Option<Vec<PathBuf>>, ContentError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ContentError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ContentError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        paths.push(entry.path());
    }
    Ok(Some(paths))
}

fn read_file(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A file removed between lookup and read counts as absent.
fn absent_as_none<T>(result: Result<T, ContentError>) -> Result<Option<T>, ContentError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ContentError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
