use crate::infra::{seed_catalog, seed_home_page, InMemoryHomePageStore, InMemoryPageCatalog};
use chrono::{Local, NaiveDate};
use clap::Args;
use hypha_public::error::AppError;
use hypha_public::public::home::{
    EntrySource, HomePageService, ResolvedList, DEFAULT_RELATED_LIMIT,
};
use hypha_public::public::pages::{PageId, PageKind};
use std::sync::Arc;

type DemoService = HomePageService<InMemoryHomePageStore, InMemoryPageCatalog>;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for open/closed checks (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct RelatedArgs {
    /// Section to resolve: funds, labs or rfps
    #[arg(long, value_parser = crate::infra::parse_kind)]
    pub(crate) kind: PageKind,
    /// Evaluation date for open/closed checks (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Target list length (defaults to the homepage's six slots)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Replace the section's promoted pages before resolving (comma separated ids)
    #[arg(long, value_delimiter = ',')]
    pub(crate) promote: Vec<u64>,
    /// Emit JSON instead of a text listing
    #[arg(long)]
    pub(crate) json: bool,
}

fn demo_service(today: NaiveDate, limit: usize) -> DemoService {
    HomePageService::new(
        Arc::new(InMemoryHomePageStore::with_page(seed_home_page())),
        Arc::new(InMemoryPageCatalog::with_pages(seed_catalog(today))),
        limit,
    )
}

pub(crate) fn run_related(args: RelatedArgs) -> Result<(), AppError> {
    let RelatedArgs {
        kind,
        today,
        limit,
        promote,
        json,
    } = args;

    let limit = limit.unwrap_or(DEFAULT_RELATED_LIMIT);
    if limit == 0 {
        return Err(AppError::Usage("--limit must be at least 1".to_string()));
    }

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let service = demo_service(today, limit);
    if !promote.is_empty() {
        service.replace_promoted(kind, promote.into_iter().map(PageId).collect())?;
    }

    let list = service.related(kind, today)?;
    if json {
        let rendered = serde_json::to_string_pretty(&list)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
    } else {
        render_list(&list, today);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let service = demo_service(today, DEFAULT_RELATED_LIMIT);
    let context = service.context(today)?;

    println!("{} | {}", context.title, context.strapline);
    println!();
    println!("{}", context.our_work_title);
    for item in &context.our_work {
        println!("  - {}: {}", item.title, item.description);
    }
    for (heading, list) in [
        (&context.funds.title, &context.fund_list),
        (&context.labs.title, &context.lab_list),
        (&context.rfps.title, &context.rfps_list),
    ] {
        println!();
        println!("{heading}");
        render_list(list, today);
    }
    Ok(())
}

fn render_list(list: &ResolvedList, today: NaiveDate) {
    println!(
        "{} list as of {} ({} promoted, {} backfilled)",
        list.kind,
        today,
        list.promoted_count(),
        list.backfill_count()
    );

    if list.is_empty() {
        println!("  (nothing to show)");
        return;
    }

    for entry in &list.entries {
        let marker = match entry.source {
            EntrySource::Promoted => "*",
            EntrySource::Backfill => "-",
        };
        let deadline = entry
            .page
            .deadline
            .map(|date| format!("deadline {date}"))
            .unwrap_or_else(|| "no deadline".to_string());
        println!(
            "  {marker} [{}] {} {} ({deadline})",
            entry.page.id, entry.page.title, entry.page.url_path
        );
    }
}
