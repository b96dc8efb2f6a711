mod app;
mod components;
mod download;

use std::fmt;

const MOUNT_ELEMENT_ID: &str = "app";

#[derive(Debug)]
enum MountError {
  MissingElement(&'static str)
}

impl fmt::Display for MountError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | MountError::MissingElement(id) => {
        write!(
          f,
          "missing #{id} mount element"
        )
      }
    }
  }
}

fn mount_point(
  id: &'static str
) -> Result<web_sys::Element, MountError>
{
  web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document.get_element_by_id(id)
    })
    .ok_or(MountError::MissingElement(id))
}

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting roster calendar frontend"
  );

  match mount_point(MOUNT_ELEMENT_ID) {
    | Ok(mount) => {
      yew::Renderer::<app::App>::with_root(
        mount
      )
      .render();
    }
    | Err(error) => {
      tracing::error!(%error, "roster calendar not mounted");
    }
  }
}
