//! Cache bust: fetch the shadow index and swap it into the live page

use super::replace::replace;
use super::scripts::ScriptWaitSet;
use super::{log, BootContext};
use crate::dom::parse_document;
use crate::error::AppshellResult;
use crate::host::ShadowResponse;
use std::rc::Rc;

/// Fetch the shadow index, then replace head and body before allowing boot
///
/// The shadow index is a copy of the entry document without the manifest
/// attribute, so the cache never intercepts this request.
pub(crate) fn cache_bust(ctx: Rc<BootContext>) {
    log("- Busting cache");
    let url = ctx.config.shadow_url();
    let fetcher = ctx.fetcher.clone();
    let request_url = url.clone();
    fetcher.get(
        &request_url,
        Box::new(move |result| on_shadow_index(&ctx, &url, result)),
    );
}

fn on_shadow_index(ctx: &BootContext, url: &str, result: AppshellResult<ShadowResponse>) {
    match result.and_then(|response| response.into_html(url)) {
        Ok(html) => {
            log("- Replacing DOM with shadow index");
            let shadow = parse_document(&html);
            ctx.page.retain_shadow_index(html);

            let live = &ctx.page.document;
            let waits = ScriptWaitSet::new();
            replace(shadow.head(), live.head(), live, &waits);
            replace(shadow.body(), live.body(), live, &waits);

            // The cache may still be updating in the background at this point.
            let gate = ctx.gate.clone();
            waits.on_all_done(move || gate.allow_boot());
        }
        Err(err) => {
            // Boot on whatever is loaded, then surface the failure
            ctx.gate.allow_boot();
            ctx.reporter.report(err);
        }
    }
}
