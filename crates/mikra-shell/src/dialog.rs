// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Native file dialogs, kept behind the shell so applications never touch
//! the dialog backend directly.

use std::path::PathBuf;

/// Opens the platform's file-open dialog and blocks until the user picks a
/// file or cancels.
///
/// Call this from the event-loop thread only; some platforms require it.
pub fn pick_file() -> Option<PathBuf> {
    let picked = rfd::FileDialog::new().set_title("Open File").pick_file();
    match &picked {
        Some(path) => log::info!("File dialog picked '{}'.", path.display()),
        None => log::debug!("File dialog cancelled."),
    }
    picked
}
