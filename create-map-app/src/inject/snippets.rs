//! Embedded search feature snippets
//!
//! One snippet set per framework, spliced verbatim by the injection engine.
//! The import snippet is appended after the target file's import block, the
//! logic snippet goes inside the map-setup body, and React additionally
//! ships the widget as a standalone component file.

use super::SnippetSet;

const REACT_IMPORTS: &str =
    "import SearchBoxComponent from './components/SearchBoxComponent'\n";

const REACT_LOGIC: &str = "
  const center = [-71.05953, 42.36290];
";

const REACT_COMPONENT: &str = r#"import { SearchBox } from "@mapbox/search-js-react"
import { useState } from "react"

const SearchBoxComponent = ({accessToken, proximity}) => {
  const [value, setValue] = useState('')

  const handleChange = (d) => {
    setValue(d);
  };

  return (
    <SearchBox
      options={{
        proximity: proximity,
      }}
      value={value}
      onChange={handleChange}
      accessToken={accessToken}
    />
  );
}

export default SearchBoxComponent
"#;

const VUE_IMPORTS: &str = "import { MapboxSearchBox } from '@mapbox/search-js-web'\n";

const VUE_LOGIC: &str = "
  const searchBox = new MapboxSearchBox();
  searchBox.accessToken = accessToken;
  searchBox.options = { proximity: center };
  searchBox.marker = true;
  searchBox.mapboxgl = mapboxgl;
  map.addControl(searchBox);
";

const SVELTE_IMPORTS: &str = "  import { MapboxSearchBox } from '@mapbox/search-js-web';\n";

const SVELTE_LOGIC: &str = "
    const searchBox = new MapboxSearchBox();
    searchBox.accessToken = accessToken;
    searchBox.options = { proximity: center };
    searchBox.marker = true;
    searchBox.mapboxgl = mapboxgl;
    map.addControl(searchBox);
";

const ANGULAR_IMPORTS: &str = "import { MapboxSearchBox } from '@mapbox/search-js-web';\n";

const ANGULAR_LOGIC: &str = "
    const searchBox = new MapboxSearchBox();
    searchBox.accessToken = environment.mapboxAccessToken;
    searchBox.options = { proximity: [-71.05953, 42.36290] };
    searchBox.marker = true;
    this.map.addControl(searchBox as any);
";

const VANILLA_IMPORTS: &str = "import { MapboxSearchBox } from '@mapbox/search-js-web';\n";

const VANILLA_LOGIC: &str = "
        const searchBox = new MapboxSearchBox();
        searchBox.accessToken = mapboxgl.accessToken;
        searchBox.options = {
            types: 'address,poi',
        };
        searchBox.marker = true;
        searchBox.mapboxgl = mapboxgl;
        map.addControl(searchBox);
";

const NO_BUNDLER_IMPORTS: &str =
    "    <script id=\"search-js\" defer src=\"https://api.mapbox.com/search-js/v1.0.0/web.js\"></script>\n";

const NO_BUNDLER_LOGIC: &str = "
        const searchBox = new mapboxsearch.MapboxSearchBox();
        searchBox.accessToken = mapboxgl.accessToken;
        searchBox.marker = true;
        searchBox.mapboxgl = mapboxgl;
        map.addControl(searchBox);
";

/// Snippet set for the React template (widget lives in its own file).
pub(super) fn react() -> SnippetSet {
    SnippetSet {
        imports: REACT_IMPORTS,
        component: Some(REACT_COMPONENT),
        search_logic: REACT_LOGIC,
    }
}

/// Snippet set for the Vue template.
pub(super) fn vue() -> SnippetSet {
    SnippetSet {
        imports: VUE_IMPORTS,
        component: None,
        search_logic: VUE_LOGIC,
    }
}

/// Snippet set for the Svelte template.
pub(super) fn svelte() -> SnippetSet {
    SnippetSet {
        imports: SVELTE_IMPORTS,
        component: None,
        search_logic: SVELTE_LOGIC,
    }
}

/// Snippet set for the Angular template.
pub(super) fn angular() -> SnippetSet {
    SnippetSet {
        imports: ANGULAR_IMPORTS,
        component: None,
        search_logic: ANGULAR_LOGIC,
    }
}

/// Snippet set for the Vite vanilla template.
pub(super) fn vanilla() -> SnippetSet {
    SnippetSet {
        imports: VANILLA_IMPORTS,
        component: None,
        search_logic: VANILLA_LOGIC,
    }
}

/// Snippet set for the CDN-based vanilla template.
pub(super) fn vanilla_no_bundler() -> SnippetSet {
    SnippetSet {
        imports: NO_BUNDLER_IMPORTS,
        component: None,
        search_logic: NO_BUNDLER_LOGIC,
    }
}
