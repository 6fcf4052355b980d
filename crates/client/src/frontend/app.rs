//! Single inventory page: search, table, pager, add form, detail panel.

use leptos::*;

use stockroom_core::ItemId;

use crate::api::{ApiClient, InventoryApi};
use crate::view::InventoryView;

fn refresh(api: ApiClient, state: RwSignal<InventoryView>) {
    state.update(|v| v.begin_load());
    spawn_local(async move {
        let result = api.list_items().await;
        state.update(|v| v.finish_load(result));
    });
}

#[component]
pub fn App() -> impl IntoView {
    let api = ApiClient::new(crate::backend_url());
    let state = create_rw_signal(InventoryView::new());

    refresh(api.clone(), state);

    let api_add = api.clone();
    let on_add = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let api = api_add.clone();
        let new_item = state.with_untracked(|v| v.draft.to_new_item());
        spawn_local(async move {
            let result = api.add_item(&new_item).await;
            if state.try_update(|v| v.finish_add(result)).unwrap_or(false) {
                refresh(api, state);
            }
        });
    };

    view! {
        <div class="app">
            <header>
                <h1>"Inventory"</h1>
            </header>

            <main>
                <div class="search">
                    <input
                        type="text"
                        placeholder="Search by name"
                        prop:value=move || state.with(|v| v.search_term().to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|v| v.set_search_term(value));
                        }
                    />
                    <button on:click=move |_| state.update(|v| v.find())>"Find"</button>
                    <button on:click=move |_| state.update(|v| v.reset_search())>"Reset"</button>
                </div>

                {move || state.with(|v| v.error().map(|e| view! { <p class="error">{e.to_string()}</p> }))}
                {move || state.with(|v| v.is_loading().then(|| view! { <p>"Loading..."</p> }))}

                <InventoryTable api=api.clone() state=state/>
                <Pager state=state/>

                <form class="add-item" on:submit=on_add>
                    <input
                        type="text"
                        placeholder="Item name"
                        prop:value=move || state.with(|v| v.draft.item_name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|v| v.draft.item_name = value);
                        }
                    />
                    <input
                        type="number"
                        prop:value=move || state.with(|v| v.draft.quantity.to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|v| v.draft.set_quantity_text(&value));
                        }
                    />
                    <button type="submit">"Add Item"</button>
                </form>

                <ItemDetail state=state/>
            </main>
        </div>
    }
}

#[component]
fn InventoryTable(api: ApiClient, state: RwSignal<InventoryView>) -> impl IntoView {
    let select = {
        let api = api.clone();
        move |id: ItemId| {
            let api = api.clone();
            spawn_local(async move {
                let result = api.get_item(id).await;
                state.update(|v| v.finish_select(result));
            });
        }
    };
    let delete = move |id: ItemId| {
        let api = api.clone();
        spawn_local(async move {
            let result = api.delete_item(id).await;
            if state.try_update(|v| v.finish_delete(id, result)).unwrap_or(false) {
                refresh(api, state);
            }
        });
    };

    view! {
        <table>
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Quantity"</th>
                    <th>"Supplier"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let rows = state.with(|v| v.current_items().to_vec());
                    rows.into_iter()
                        .map(|item| {
                            let id = item.id;
                            let select = select.clone();
                            let delete = delete.clone();
                            let supplier = item
                                .supplier
                                .as_ref()
                                .map(|s| s.name.clone())
                                .unwrap_or_default();
                            view! {
                                <tr>
                                    <td on:click=move |_| select(id)>{item.name}</td>
                                    <td>{item.quantity}</td>
                                    <td>{supplier}</td>
                                    <td>
                                        <button on:click=move |_| delete(id)>"Delete"</button>
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

#[component]
fn Pager(state: RwSignal<InventoryView>) -> impl IntoView {
    move || {
        state.with(|v| v.shows_page_controls()).then(|| {
            view! {
                <div class="pager">
                    <button on:click=move |_| state.update(|v| v.previous_page())>"Previous"</button>
                    <span>
                        {move || state.with(|v| format!("Page {} of {}", v.current_page(), v.total_pages()))}
                    </span>
                    <button on:click=move |_| state.update(|v| v.next_page())>"Next"</button>
                </div>
            }
        })
    }
}

#[component]
fn ItemDetail(state: RwSignal<InventoryView>) -> impl IntoView {
    move || {
        state.with(|v| v.selected().cloned()).map(|item| {
            let supplier = item.supplier.clone();
            view! {
                <div class="item-detail">
                    <h2>{item.name}</h2>
                    <p>{format!("Quantity: {}", item.quantity)}</p>
                    {supplier.map(|s| view! {
                        <p>{format!("Supplier: {}", s.name)}</p>
                        <p>{format!("Address: {}", s.address.unwrap_or_default())}</p>
                        <p>{format!("Contact: {}", s.contact.unwrap_or_default())}</p>
                    })}
                </div>
            }
        })
    }
}
