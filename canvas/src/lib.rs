//! Layout engine for the campaign canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and natively
//! inside the host runtime and tests. It owns the spatial side of the canvas:
//! turning upstream character and group records into positioned nodes,
//! translating pointer gestures into moves and resizes, offering alignment
//! guides while dragging, and deciding when a change must be persisted. The
//! host is responsible only for wiring events to the engine and carrying the
//! resulting [`engine::Action`]s to the persistence layer.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Node identities, sizes, upstream entities, and the node store |
//! | [`snap`] | Alignment snapping between items, and grid snapping |
//! | [`sizes`] | Session cache of locally authoritative sizes |
//! | [`reconcile`] | Rebuilds render nodes from fresh upstream data |
//! | [`debounce`] | Per-key debounce for position writes |
//! | [`resize`] | Explicit resize mode for item cards |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against nodes and group handles |
//! | [`render`] | Scene rendering to a 2D canvas context |
//! | [`consts`] | Shared numeric constants (card sizes, thresholds, zoom limits) |

pub mod camera;
pub mod consts;
pub mod debounce;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod reconcile;
pub mod render;
pub mod resize;
pub mod sizes;
pub mod snap;
