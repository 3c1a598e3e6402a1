// src/crawl/engine.rs
// =============================================================================
// This module implements the breadth-first crawl that builds a sitemap.
//
// How it works:
// 1. Fetch the homepage; if that fails there is nothing to map
// 2. Filter its links, mark the survivors visited and queue them
// 3. Pop a URL from the front of the queue and fetch it
// 4. Filter its links against the same global visited set, queue the
//    survivors and record the page under its URL
// 5. Repeat until the queue is empty and no fetch is in flight
//
// Every URL is marked visited before it is queued, never after it is
// fetched, so a page linked from many places is still fetched only once.
//
// With more than one worker, up to `workers` fetches run at the same time.
// They only produce data: all bookkeeping (visited set, queue, sitemap)
// happens here on the task driving the crawl, one completed fetch at a time.
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::filter::filter_links;
use crate::error::CrawlError;
use crate::fetch::{PageData, PageFetcher};
use crate::sitemap::{PageRecord, Sitemap, ROOT_KEY};

/// Something that happened during a crawl, for progress reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    Started { homepage: String },
    /// Number of URLs waiting, reported just before one is taken
    QueueSize(usize),
    Visiting { url: String },
    Discovered { url: String, children: Vec<String> },
    PageFailed { url: String, error: String },
    Finished { pages: usize },
}

pub type ProgressCallback = Arc<dyn Fn(&CrawlEvent) + Send + Sync>;

/// Knobs for a crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Maximum number of fetches in flight; 1 means a plain sequential crawl
    pub workers: usize,
    /// Sort each page's new links lexically so output is reproducible
    pub sort_links: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            sort_links: false,
        }
    }
}

// Mutable state of one crawl run
#[derive(Debug, Default)]
struct Traversal {
    visited: HashSet<String>,
    frontier: VecDeque<String>,
    sitemap: Sitemap,
}

impl Traversal {
    // Records a fetched page and queues its new children
    //
    // Returns the children that were queued (the page's child_links).
    fn absorb(&mut self, homepage: &str, key: &str, page: PageData, sort: bool) -> Vec<String> {
        let children = filter_links(homepage, &self.visited, &page.links, sort);
        debug!("{} new link(s) on {}", children.len(), key);

        for child in &children {
            self.visited.insert(child.clone());
            self.frontier.push_back(child.clone());
        }

        self.sitemap
            .insert(key, PageRecord::from_page(page, children.clone()));
        children
    }
}

/// Breadth-first crawler that owns its fetcher and traversal state
pub struct CrawlEngine<F> {
    fetcher: F,
    options: CrawlOptions,
    progress: Option<ProgressCallback>,
    traversal: Traversal,
}

impl<F: PageFetcher> CrawlEngine<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            options: CrawlOptions::default(),
            progress: None,
            traversal: Traversal::default(),
        }
    }

    pub fn with_options(mut self, options: CrawlOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// URLs queued by the most recent crawl (plus its homepage)
    pub fn visited(&self) -> &HashSet<String> {
        &self.traversal.visited
    }

    /// Crawls every same-domain page reachable from `homepage`
    ///
    /// A homepage that cannot be fetched aborts the crawl with
    /// `CrawlError::HomepageUnreachable`. Any other page that cannot be
    /// fetched is recorded as an empty placeholder (its `fetch_error` is set)
    /// and the crawl carries on without it.
    pub async fn crawl(&mut self, homepage: &str) -> Result<Sitemap, CrawlError> {
        self.traversal = Traversal::default();
        self.traversal.visited.insert(homepage.to_string());

        let progress = self.progress.as_ref();
        let sort = self.options.sort_links;
        let workers = self.options.workers.max(1);

        info!("Starting crawl of {} with {} worker(s)", homepage, workers);
        emit(progress, CrawlEvent::Started {
            homepage: homepage.to_string(),
        });

        let page = match self.fetcher.fetch(homepage).await {
            Ok(page) => page,
            Err(source) => {
                warn!("Homepage {} could not be fetched: {}", homepage, source);
                return Err(CrawlError::HomepageUnreachable {
                    url: homepage.to_string(),
                    source,
                });
            }
        };

        let traversal = &mut self.traversal;
        let children = traversal.absorb(homepage, ROOT_KEY, page, sort);
        emit(progress, CrawlEvent::Discovered {
            url: homepage.to_string(),
            children,
        });

        let fetcher = &self.fetcher;
        let mut in_flight = FuturesUnordered::new();

        loop {
            // Top up the pool from the front of the queue
            while in_flight.len() < workers {
                let url = match traversal.frontier.pop_front() {
                    Some(url) => url,
                    None => break,
                };
                emit(progress, CrawlEvent::QueueSize(traversal.frontier.len() + 1));
                emit(progress, CrawlEvent::Visiting { url: url.clone() });

                in_flight.push(async move {
                    let result = fetcher.fetch(&url).await;
                    (url, result)
                });
            }

            // Queue empty and nothing in flight: done
            let (url, result) = match in_flight.next().await {
                Some(done) => done,
                None => break,
            };

            match result {
                Ok(page) => {
                    let children = traversal.absorb(homepage, &url, page, sort);
                    emit(progress, CrawlEvent::Discovered { url, children });
                }
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    traversal
                        .sitemap
                        .insert(url.clone(), PageRecord::failed(e.to_string()));
                    emit(progress, CrawlEvent::PageFailed {
                        url,
                        error: e.to_string(),
                    });
                }
            }
        }

        let sitemap = std::mem::take(&mut traversal.sitemap);
        info!("Crawl complete. Mapped {} page(s)", sitemap.len());
        emit(progress, CrawlEvent::Finished {
            pages: sitemap.len(),
        });
        Ok(sitemap)
    }
}

fn emit(progress: Option<&ProgressCallback>, event: CrawlEvent) {
    if let Some(callback) = progress {
        callback(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const HOME: &str = "http://www.thewestbayhotel.co.uk";

    // Serves canned pages; any URL it does not know is a 404
    #[derive(Default)]
    struct ScriptedFetcher {
        pages: HashMap<String, PageData>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn page(mut self, url: &str, links: &[&str]) -> Self {
            self.pages.insert(
                url.to_string(),
                PageData {
                    links: links.iter().map(|l| Some(l.to_string())).collect(),
                    css: vec!["/css/".to_string()],
                    images: vec!["img.png".to_string()],
                },
            );
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> Result<PageData, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().ok_or(FetchError::Status(404))
        }
    }

    fn url(path: &str) -> String {
        format!("{}{}", HOME, path)
    }

    fn four_page_site() -> ScriptedFetcher {
        ScriptedFetcher::default()
            .page(HOME, &["/child1/", "/child2/"])
            .page(&url("/child1/"), &[])
            .page(&url("/child2/"), &["/child3/"])
            .page(&url("/child3/"), &[])
    }

    fn sorted(mut links: Vec<String>) -> Vec<String> {
        links.sort();
        links
    }

    #[tokio::test]
    async fn test_crawl_four_page_site() {
        let mut engine = CrawlEngine::new(four_page_site());
        let sitemap = engine.crawl(HOME).await.unwrap();

        assert_eq!(sitemap.len(), 4);

        let top = sitemap.root().unwrap();
        assert_eq!(
            sorted(top.child_links.clone()),
            vec![url("/child1/"), url("/child2/")]
        );
        assert_eq!(top.raw_links, vec![Some("/child1/".to_string()), Some("/child2/".to_string())]);
        assert_eq!(top.css, vec!["/css/"]);
        assert_eq!(top.images, vec!["img.png"]);

        assert!(sitemap.get(&url("/child1/")).unwrap().child_links.is_empty());
        assert_eq!(
            sitemap.get(&url("/child2/")).unwrap().child_links,
            vec![url("/child3/")]
        );
        assert!(sitemap.get(&url("/child3/")).unwrap().child_links.is_empty());
    }

    #[tokio::test]
    async fn test_each_page_is_fetched_once() {
        // Every page links back to every other page and to the homepage
        let links = ["/", "/a/", "/b/", "/c/", HOME];
        let fetcher = ScriptedFetcher::default()
            .page(HOME, &links)
            .page(&url("/a/"), &links)
            .page(&url("/b/"), &links)
            .page(&url("/c/"), &links);

        let mut engine = CrawlEngine::new(fetcher);
        let sitemap = engine.crawl(HOME).await.unwrap();

        assert_eq!(sitemap.len(), 4);
        assert_eq!(engine.fetcher.calls().len(), 4);

        let mut calls = engine.fetcher.calls();
        calls.sort();
        calls.dedup();
        assert_eq!(calls.len(), 4);

        // Only the homepage discovered anything; later pages saw only visited links
        assert_eq!(sitemap.root().unwrap().child_links.len(), 3);
        for path in ["/a/", "/b/", "/c/"] {
            assert!(sitemap.get(&url(path)).unwrap().child_links.is_empty());
        }
    }

    #[tokio::test]
    async fn test_crawl_is_breadth_first() {
        let fetcher = ScriptedFetcher::default()
            .page(HOME, &["/a/", "/b/"])
            .page(&url("/a/"), &["/a/deep/"])
            .page(&url("/b/"), &[])
            .page(&url("/a/deep/"), &[]);

        let mut engine = CrawlEngine::new(fetcher).with_options(CrawlOptions {
            workers: 1,
            sort_links: true,
        });
        engine.crawl(HOME).await.unwrap();

        assert_eq!(
            engine.fetcher.calls(),
            vec![HOME.to_string(), url("/a/"), url("/b/"), url("/a/deep/")]
        );
    }

    #[tokio::test]
    async fn test_homepage_failure_yields_no_sitemap() {
        let mut engine = CrawlEngine::new(ScriptedFetcher::default());
        let err = engine.crawl(HOME).await.unwrap_err();

        match err {
            CrawlError::HomepageUnreachable { url, .. } => assert_eq!(url, HOME),
        }
        assert_eq!(engine.fetcher.calls(), vec![HOME.to_string()]);
    }

    // A queued page can fail; it gets an empty placeholder record, so callers
    // must not expect real data for every URL in a parent's child_links.
    #[tokio::test]
    async fn test_child_failure_leaves_placeholder_and_continues() {
        let fetcher = ScriptedFetcher::default()
            .page(HOME, &["/broken/", "/fine/"])
            .page(&url("/fine/"), &["/deeper/"])
            .page(&url("/deeper/"), &[]);

        let mut engine = CrawlEngine::new(fetcher);
        let sitemap = engine.crawl(HOME).await.unwrap();

        assert_eq!(sitemap.len(), 4);

        let broken = sitemap.get(&url("/broken/")).unwrap();
        assert_eq!(broken.fetch_error.as_deref(), Some("HTTP 404"));
        assert!(broken.child_links.is_empty());

        assert!(sitemap.get(&url("/deeper/")).is_some());
        let broken_fetches = engine
            .fetcher
            .calls()
            .iter()
            .filter(|c| c.ends_with("/broken/"))
            .count();
        assert_eq!(broken_fetches, 1);
    }

    #[tokio::test]
    async fn test_visited_holds_every_queued_url() {
        let mut engine = CrawlEngine::new(four_page_site());
        engine.crawl(HOME).await.unwrap();

        let mut visited: Vec<_> = engine.visited().iter().cloned().collect();
        visited.sort();
        assert_eq!(
            visited,
            vec![
                HOME.to_string(),
                url("/child1/"),
                url("/child2/"),
                url("/child3/"),
            ]
        );
    }

    #[tokio::test]
    async fn test_second_crawl_starts_fresh() {
        let mut engine = CrawlEngine::new(four_page_site());
        let first = engine.crawl(HOME).await.unwrap();
        let second = engine.crawl(HOME).await.unwrap();

        assert_eq!(first.len(), 4);
        assert_eq!(second.len(), 4);
    }

    #[tokio::test]
    async fn test_worker_pool_maps_the_same_site() {
        let mut engine = CrawlEngine::new(four_page_site()).with_options(CrawlOptions {
            workers: 3,
            sort_links: true,
        });
        let sitemap = engine.crawl(HOME).await.unwrap();

        assert_eq!(sitemap.len(), 4);
        assert_eq!(engine.fetcher.calls().len(), 4);
        assert_eq!(
            sitemap.root().unwrap().child_links,
            vec![url("/child1/"), url("/child2/")]
        );
        assert_eq!(
            sitemap.get(&url("/child2/")).unwrap().child_links,
            vec![url("/child3/")]
        );
    }

    #[tokio::test]
    async fn test_progress_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();

        let mut engine = CrawlEngine::new(four_page_site())
            .with_options(CrawlOptions {
                workers: 1,
                sort_links: true,
            })
            .with_progress_callback(Arc::new(move |event: &CrawlEvent| {
                sink.lock().unwrap().push(event.clone());
            }));
        engine.crawl(HOME).await.unwrap();

        let events = events.lock().unwrap();
        assert_eq!(
            events.first(),
            Some(&CrawlEvent::Started {
                homepage: HOME.to_string()
            })
        );
        assert_eq!(events.last(), Some(&CrawlEvent::Finished { pages: 4 }));
        assert!(events.contains(&CrawlEvent::QueueSize(2)));
        assert!(events.contains(&CrawlEvent::Visiting {
            url: url("/child3/")
        }));
        assert!(events.contains(&CrawlEvent::Discovered {
            url: url("/child2/"),
            children: vec![url("/child3/")],
        }));
    }
}
