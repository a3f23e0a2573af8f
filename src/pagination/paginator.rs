//! Page-by-page and item-by-item traversal of a listing

use super::fetcher::PageFetcher;
use super::page::{Page, PageRequest};
use crate::error::Result;
use futures::{stream, Stream, TryStreamExt};
use tracing::{debug, warn};

/// Traversal state owned by a [`Paginator`]
#[derive(Debug, Clone)]
pub struct PaginationState<T> {
    /// Request that produced `page`, or the initial request before any fetch
    pub request: PageRequest,
    /// Last successfully fetched page
    pub page: Option<Page<T>>,
    /// No further page will be fetched
    pub terminal: bool,
    /// Items of `page` already handed out by item iteration
    pub cursor: usize,
    /// Successful fetches so far
    pub pages_fetched: u32,
    /// Items received so far, across all pages
    pub items_fetched: u64,
}

impl<T> PaginationState<T> {
    fn new(request: PageRequest) -> Self {
        Self {
            request,
            page: None,
            terminal: false,
            cursor: 0,
            pages_fetched: 0,
            items_fetched: 0,
        }
    }

    /// Check if at least one page has been fetched
    pub fn is_started(&self) -> bool {
        self.page.is_some()
    }
}

/// Walks a paginated listing through a [`PageFetcher`]
///
/// The paginator is bound to one initial [`PageRequest`]; its filters are
/// reused for every page. Traversal needs `&mut self`, so a single instance
/// cannot be walked from two tasks at once. Fetch errors are returned
/// unchanged and leave the paginator on its last good page, so the failed
/// call can simply be repeated.
///
/// ```rust,ignore
/// let mut numbers = client.phone_numbers().list(ListPhoneNumbersParams::default());
/// while let Some(page) = numbers.next_page().await? {
///     println!("page {} has {} numbers", page.meta.page_number, page.len());
/// }
/// ```
pub struct Paginator<T, F> {
    fetcher: F,
    state: PaginationState<T>,
}

impl<T, F> Paginator<T, F>
where
    T: Send + 'static,
    F: PageFetcher<T>,
{
    /// Bind a fetcher to the first request of a traversal
    pub fn new(fetcher: F, request: PageRequest) -> Self {
        Self {
            fetcher,
            state: PaginationState::new(request),
        }
    }

    /// Request of the current page (the initial request before any fetch)
    pub fn request(&self) -> &PageRequest {
        &self.state.request
    }

    /// Current traversal state
    pub fn state(&self) -> &PaginationState<T> {
        &self.state
    }

    /// Check if the listing is exhausted
    pub fn is_terminal(&self) -> bool {
        self.state.terminal
    }

    /// Most recently fetched page, fetching the first one if needed
    pub async fn current(&mut self) -> Result<&Page<T>> {
        match self.state.page {
            Some(ref page) => Ok(page),
            None => {
                let request = self.state.request.clone();
                self.load(request).await
            }
        }
    }

    /// Fetch the following page
    ///
    /// Before the first fetch this loads the initial page. Once the listing
    /// is exhausted it returns `Ok(None)` without touching the network.
    pub async fn next_page(&mut self) -> Result<Option<&Page<T>>> {
        if self.state.terminal {
            debug!(
                page_number = self.state.request.page_number(),
                "Listing exhausted, not fetching"
            );
            return Ok(None);
        }

        let request = if self.state.is_started() {
            match self.state.request.next() {
                Some(request) => request,
                None => {
                    warn!(
                        page_number = self.state.request.page_number(),
                        "Page number cannot advance, ending listing"
                    );
                    self.state.terminal = true;
                    return Ok(None);
                }
            }
        } else {
            self.state.request.clone()
        };
        self.load(request).await.map(Some)
    }

    /// Next item of the listing, fetching pages as needed
    pub async fn next_item(&mut self) -> Result<Option<T>>
    where
        T: Clone,
    {
        loop {
            if let Some(page) = &self.state.page {
                if let Some(item) = page.items.get(self.state.cursor) {
                    let item = item.clone();
                    self.state.cursor += 1;
                    return Ok(Some(item));
                }
                if self.state.terminal {
                    return Ok(None);
                }
            }

            if self.next_page().await?.is_none() {
                return Ok(None);
            }
        }
    }

    /// Lazily yield every remaining item, page after page
    ///
    /// Items already yielded by this paginator are not yielded again. The
    /// stream ends after an error; calling `items()` again retries the
    /// failed fetch and carries on from there.
    pub fn items(&mut self) -> impl Stream<Item = Result<T>> + '_
    where
        T: Clone,
    {
        stream::unfold(Some(self), |paginator| async move {
            let paginator = paginator?;
            match paginator.next_item().await {
                Ok(Some(item)) => Some((Ok(item), Some(paginator))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// Drain all remaining items into a vector
    pub async fn collect_all(&mut self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.items().try_collect().await
    }

    async fn load(&mut self, request: PageRequest) -> Result<&Page<T>> {
        let page = self.fetcher.fetch(&request).await?;
        let terminal = page.is_last(&request);

        debug!(
            page_number = request.page_number(),
            page_size = request.page_size(),
            items = page.len(),
            terminal,
            "Fetched page"
        );

        self.state.request = request;
        self.state.terminal = terminal;
        self.state.cursor = 0;
        self.state.pages_fetched += 1;
        self.state.items_fetched += page.len() as u64;
        Ok(self.state.page.insert(page))
    }
}

impl<T, F> std::fmt::Debug for Paginator<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("request", &self.state.request)
            .field("terminal", &self.state.terminal)
            .field("pages_fetched", &self.state.pages_fetched)
            .finish_non_exhaustive()
    }
}
