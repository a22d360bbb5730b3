use leptos::*;

use crate::{
    access::DASHBOARD_PATH,
    api::{ApiClient, ApiError, Package, SiteBanner},
    components::layout::LoadingSpinner,
    pages::admin_catalog::utils::format_price,
    utils::ordering::sort_by_order,
};

/// Active banners in `position` order.
pub fn visible_banners(mut banners: Vec<SiteBanner>) -> Vec<SiteBanner> {
    banners.retain(|banner| banner.is_active);
    sort_by_order(&mut banners);
    banners
}

/// Active packages, featured ones first.
pub fn showcase_packages(mut packages: Vec<Package>) -> Vec<Package> {
    packages.retain(|package| package.is_active);
    sort_by_order(&mut packages);
    packages.sort_by_key(|package| !package.is_featured);
    packages
}

async fn load_landing(api: &ApiClient) -> Result<(Vec<SiteBanner>, Vec<Package>), ApiError> {
    let banners = api.list::<SiteBanner>(Some("position"), None).await?;
    let packages = api.list::<Package>(Some("order"), None).await?;
    Ok((visible_banners(banners), showcase_packages(packages)))
}

#[component]
fn BannerCard(banner: SiteBanner) -> impl IntoView {
    let link = banner.link_url.clone().unwrap_or_else(|| "/contact".to_string());
    view! {
        <a href=link class="block rounded-lg bg-surface-elevated shadow p-6 hover:shadow-md">
            <h2 class="text-2xl font-bold text-fg">{banner.title}</h2>
            {banner.subtitle.map(|text| view! { <p class="mt-1 text-fg-muted">{text}</p> })}
        </a>
    }
}

#[component]
fn PackageCard(package: Package) -> impl IntoView {
    let price = package.price.map(format_price);
    let featured = package.is_featured;
    view! {
        <div class="rounded-lg bg-surface-elevated shadow p-5 space-y-2">
            <div class="flex items-center justify-between">
                <h3 class="text-lg font-semibold text-fg">{package.name}</h3>
                <Show when=move || featured>
                    <span class="rounded bg-action-primary-bg px-2 py-0.5 text-xs text-action-primary-text">
                        "Popular"
                    </span>
                </Show>
            </div>
            {price.map(|p| view! { <p class="text-fg">{p}</p> })}
            <ul class="text-sm text-fg-muted list-disc list-inside">
                {package.features.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
            </ul>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let landing = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { load_landing(&api).await }
        },
    );

    view! {
        <div class="space-y-10">
            <div class="text-center">
                <h1 class="text-4xl font-extrabold text-fg sm:text-5xl">"Ironhall"</h1>
                <p class="mt-3 text-fg-muted sm:text-lg">
                    "Clubs, classes and coaching for every level."
                </p>
                <div class="mt-5 flex justify-center gap-3">
                    <a href="/fitness" class="rounded-md px-6 py-3 font-medium bg-action-primary-bg text-action-primary-text">
                        "Try the fitness calculator"
                    </a>
                    <a href="/contact" class="rounded-md px-6 py-3 font-medium border border-border text-fg">
                        "Get in touch"
                    </a>
                </div>
            </div>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || landing.get().map(|result| match result {
                    Ok((banners, packages)) => view! {
                        <div class="grid gap-4 md:grid-cols-2">
                            {banners.into_iter().map(|banner| view! { <BannerCard banner=banner /> }).collect_view()}
                        </div>
                        <div class="grid gap-4 md:grid-cols-3">
                            {packages.into_iter().map(|package| view! { <PackageCard package=package /> }).collect_view()}
                        </div>
                    }
                    .into_view(),
                    Err(err) => {
                        log::warn!("landing content unavailable: {}", err);
                        ().into_view()
                    }
                })}
            </Suspense>
            <p class="text-center text-xs text-fg-muted">
                <a href=DASHBOARD_PATH>"Staff sign in"</a>
            </p>
        </div>
    }
}
