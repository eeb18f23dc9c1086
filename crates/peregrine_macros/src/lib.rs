use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, Pat};

/// Time a function when the calling crate's `perf_stats` feature is enabled.
///
/// The function body is wrapped with a guard that logs the elapsed time on
/// exit through `tracing::info!`. Without the feature the guard is compiled
/// out and the function is left untouched.
///
/// # Features
/// - Auto-detects a `config: &DigestConfig` parameter and reports its sample count
/// - Logs when duration exceeds the threshold (default 1ms)
/// - Zero-cost when the feature is disabled
///
/// # Example
/// ```ignore
/// #[profile]
/// pub fn digest_function(id: FunctionId, config: &DigestConfig) -> FunctionDigest {
///     // ... work ...
/// }
/// ```
///
/// # Optional Parameters
/// ```ignore
/// #[profile(5)]  // Custom threshold in milliseconds
/// pub fn digest_all(config: &DigestConfig) -> Vec<FunctionDigest> { ... }
/// ```
#[proc_macro_attribute]
pub fn profile(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let threshold_ms: u128 = if attr.is_empty() {
        1
    } else {
        attr.to_string().parse().unwrap_or(1)
    };

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;
    let fn_name_str = sig.ident.to_string();

    // Look for `config: &DigestConfig` so the log line can carry the sweep size
    let has_config_param = sig.inputs.iter().any(|arg| {
        if let FnArg::Typed(pat_type) = arg {
            if let Pat::Ident(pat_ident) = &*pat_type.pat {
                if pat_ident.ident == "config" {
                    let ty = &pat_type.ty;
                    let type_str = quote!(#ty).to_string();
                    return type_str.contains("DigestConfig");
                }
            }
        }
        false
    });

    let profile_guard_def = if has_config_param {
        quote! {
            struct ProfileGuard {
                name: &'static str,
                start: std::time::Instant,
                samples: u32,
            }
            impl Drop for ProfileGuard {
                fn drop(&mut self) {
                    let elapsed = self.start.elapsed();
                    if elapsed.as_millis() >= #threshold_ms {
                        tracing::info!("[PERF] {}: {:?} | Samples: {}", self.name, elapsed, self.samples);
                    }
                }
            }
            ProfileGuard {
                name: #fn_name_str,
                start: std::time::Instant::now(),
                samples: config.samples,
            }
        }
    } else {
        quote! {
            struct ProfileGuard {
                name: &'static str,
                start: std::time::Instant,
            }
            impl Drop for ProfileGuard {
                fn drop(&mut self) {
                    let elapsed = self.start.elapsed();
                    if elapsed.as_millis() >= #threshold_ms {
                        tracing::info!("[PERF] {}: {:?}", self.name, elapsed);
                    }
                }
            }
            ProfileGuard {
                name: #fn_name_str,
                start: std::time::Instant::now(),
            }
        }
    };

    let output = quote! {
        #(#attrs)*
        #vis #sig {
            #[cfg(feature = "perf_stats")]
            let _profile_timer = {
                #profile_guard_def
            };

            #block
        }
    };

    output.into()
}
