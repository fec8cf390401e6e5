//! Spatial layout and input engine for the mandala worldbuilding canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of a mandala on screen: mapping logical post-it coordinates
//! to pixels, keeping dragged items inside the circle, classifying positions
//! into dimension sectors and scale rings, laying out expanded children in
//! orbits, and stacking items in paint order. The host JavaScript layer is
//! responsible only for wiring DOM events to the engine and persisting the
//! resulting [`engine::Action`]s to the backend.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Mandala aggregate, entities, and the arena store |
//! | [`camera`] | Pan/zoom camera and screen/world conversions |
//! | [`coords`] | Logical ↔ absolute mandala coordinates |
//! | [`radial`] | Dimension/scale classification of logical points |
//! | [`bounds`] | Drag boundary constraint |
//! | [`orbit`] | Orbit layout of expanded children |
//! | [`expansion`] | Expanded parents, visible and exiting children |
//! | [`zorder`] | Paint/interaction order |
//! | [`filter`] | Typed dimension/scale/tag filters |
//! | [`navigation`] | Breadcrumb trail with scope reset |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against drawn items |
//! | [`render`] | Scene rendering |
//! | [`settings`] | Element sizes and animation timing |
//! | [`consts`] | Shared numeric constants |

pub mod bounds;
pub mod camera;
pub mod consts;
pub mod coords;
pub mod doc;
pub mod engine;
pub mod expansion;
pub mod filter;
pub mod hit;
pub mod input;
pub mod navigation;
pub mod orbit;
pub mod radial;
pub mod render;
pub mod settings;
pub mod zorder;
