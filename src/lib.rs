//=========================================================================
// Exhibit Interaction Library Root
//
// Touch interaction core for an artefact explorer: a museum-style scene
// the visitor browses with swipes, pinches, taps and drags before
// opening per-artefact activities.
//
// Responsibilities:
// - Expose the runtime entry point (`Engine`, `EngineBuilder`)
// - Expose the interaction systems (`core`) for hosts that drive their
//   own loop through `Session` and `InteractionController`
// - Keep the window and OS integration (`platform`) private
//
// Typical usage:
// ```no_run
// use exhibit_interaction::EngineBuilder;
// use exhibit_interaction::core::scene::SceneKind;
//
// fn main() {
//     EngineBuilder::new()
//         .build()
//         .init(|session| session.register_scene("Gallery", SceneKind::Menu))
//         .run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the mode machine, camera, gestures, arbitration and
// session lifecycle. Everything in it runs without a window.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the Winit event loop and turns touches and left-mouse
// input into engine events. `engine` wires it to the core thread.
//
mod platform;
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
