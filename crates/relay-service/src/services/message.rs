//! Message service
//!
//! Handles message creation and the cache-assisted paginated listing.

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use relay_core::entities::{Message, MessageDraft};

use crate::dto::{CreateMessageRequest, MessageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Portion of a page resolved against the cache window, and what is still
/// owed by the durable store.
struct PagePlan {
    /// Cache entries that belong on the requested page, newest first
    page_items: Vec<Message>,
    /// How many more items the durable store must provide
    need: i64,
    /// Offset into the durable listing once the cached ids are excluded
    db_offset: i64,
    /// Every id the cache returned, excluded from the durable query so the
    /// boundary between cached and evicted entries cannot produce duplicates
    exclude: Vec<Uuid>,
}

/// Split a page between the cache window and the durable store.
///
/// The cache result is trusted as the newest-N prefix of the global order,
/// so the page takes `cached[offset..offset+page_size]` and the remainder
/// comes from the durable store with all cached ids excluded. Within that
/// exclusion-filtered order the leftover items start right after the
/// cache-covered range.
fn plan_page(cached: Vec<Message>, offset: i64, page_size: i64) -> PagePlan {
    let exclude: Vec<Uuid> = cached.iter().map(|m| m.id).collect();
    let covered = cached.len() as i64;

    let skip = offset.min(covered) as usize;
    let page_items: Vec<Message> = cached
        .into_iter()
        .skip(skip)
        .take(page_size as usize)
        .collect();

    PagePlan {
        need: page_size - page_items.len() as i64,
        db_offset: (offset - covered).max(0),
        page_items,
        exclude,
    }
}

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new message
    ///
    /// The durable insert is authoritative; mirroring the fresh message
    /// into the cache is best-effort and never fails the request.
    #[instrument(skip(self, request))]
    pub async fn create_message(&self, request: CreateMessageRequest) -> ServiceResult<MessageResponse> {
        let message = self
            .ctx
            .message_repo()
            .insert(MessageDraft {
                text: request.text,
                user_id: request.user_id,
            })
            .await?;

        if let Err(e) = self.ctx.message_cache().insert(&message).await {
            warn!(
                message_id = %message.id,
                error = %e,
                "Could not mirror message into cache"
            );
        }

        info!(message_id = %message.id, "Message created");

        Ok(MessageResponse::from(&message))
    }

    /// Produce page `page` (1-indexed) of size `page_size`, newest first.
    ///
    /// Pages that overlap the cache window are served from the cache first,
    /// with the durable store filling the remainder. Once the offset is past
    /// the window the cache cannot order anything, so the page comes from
    /// the durable store alone.
    #[instrument(skip(self))]
    pub async fn list_page(&self, page: i64, page_size: i64) -> ServiceResult<Vec<MessageResponse>> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 100);
        let offset = (page - 1) * page_size;
        let capacity = self.ctx.message_cache().capacity() as i64;

        if offset >= capacity {
            let messages = self
                .ctx
                .message_repo()
                .list(page_size, offset, &[])
                .await?;
            return Ok(messages.iter().map(MessageResponse::from).collect());
        }

        let mut messages = match self.ctx.message_cache().list().await {
            Ok(cached) => {
                debug!(count = cached.len(), "Serving page prefix from cache");

                let plan = plan_page(cached, offset, page_size);
                let mut messages = plan.page_items;
                if plan.need > 0 {
                    // The durable store is authoritative past the cached
                    // prefix; a failure here fails the request.
                    let remainder = self
                        .ctx
                        .message_repo()
                        .list(plan.need, plan.db_offset, &plan.exclude)
                        .await?;
                    messages.extend(remainder);
                }
                messages
            }
            Err(e) => {
                warn!(error = %e, "Cache listing failed, serving page from database");
                self.ctx.message_repo().list(page_size, offset, &[]).await?
            }
        };

        messages.truncate(page_size as usize);

        Ok(messages.iter().map(MessageResponse::from).collect())
    }
}
