//! Product list shown on the admin Products tab.

use leptos::prelude::*;

use crate::net::types::Product;
use crate::state::records::CollectionState;

fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

#[component]
pub fn ProductTable(
    products: RwSignal<CollectionState<Product>>,
    on_edit: Callback<Product>,
    on_delete: Callback<String>,
) -> impl IntoView {
    view! {
        <Show when=move || products.with(|p| p.error.is_some())>
            <p class="admin-page__error">{move || products.with(|p| p.error.clone().unwrap_or_default())}</p>
        </Show>
        <Show
            when=move || products.with(|p| !p.loading || !p.items.is_empty())
            fallback=|| view! { <p>"Loading products..."</p> }
        >
            <table class="record-table">
                <thead>
                    <tr>
                        <th>"Product"</th>
                        <th>"Price"</th>
                        <th>"Stock"</th>
                        <th>"Status"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || products.with(|p| p.items.clone())
                        key=|p| p.id.clone()
                        children=move |product: Product| {
                            let id = product.id.clone();
                            let thumb = product.image_urls.first().cloned();
                            let price = match product.discount_price {
                                Some(discount) => {
                                    format!("{} (was {})", format_price(discount), format_price(product.price))
                                }
                                None => format_price(product.price),
                            };
                            let inactive = !product.is_active;
                            let status = if inactive { "Inactive" } else { "Active" };
                            let edit_target = product.clone();
                            view! {
                                <tr>
                                    <td class="record-table__name">
                                        {thumb.map(|src| view! { <img class="record-table__thumb" src=src alt=""/> })}
                                        <span>{product.name.clone()}</span>
                                        {product.sku.clone().map(|sku| view! { <span class="record-table__sku">{sku}</span> })}
                                    </td>
                                    <td>{price}</td>
                                    <td>{product.stock_quantity}</td>
                                    <td>
                                        <span class="badge" class:badge--muted=inactive>{status}</span>
                                        {product.is_featured.then(|| view! { <span class="badge badge--accent">"Featured"</span> })}
                                    </td>
                                    <td class="record-table__actions">
                                        <button class="btn btn--small" on:click=move |_| on_edit.run(edit_target.clone())>
                                            "Edit"
                                        </button>
                                        <button
                                            class="btn btn--small btn--danger"
                                            on:click=move |_| on_delete.run(id.clone())
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </Show>
    }
}
