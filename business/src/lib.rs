pub mod application {
    pub mod cart {
        pub mod add;
        pub mod change_quantity;
        pub mod count;
        pub mod load;
        pub mod remove;
    }
    pub mod checkout {
        pub mod prepare;
        pub mod select_payment;
    }
    pub mod order {
        pub mod list;
        pub mod place;
    }
}

pub mod domain {
    pub mod errors;
    pub mod identity;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod cart {
        pub mod count;
        pub mod errors;
        pub mod model;
        pub mod quantity;
        pub mod repository;
        pub mod session;
        pub mod store;
        pub mod totals;
        pub mod use_cases {
            pub mod add;
            pub mod change_quantity;
            pub mod count;
            pub mod load;
            pub mod remove;
        }
    }
    pub mod checkout {
        pub mod drafts;
        pub mod errors;
        pub mod model;
        pub mod projector;
        pub mod repository;
        pub mod use_cases {
            pub mod prepare;
            pub mod select_payment;
        }
    }
    pub mod order {
        pub mod errors;
        pub mod model;
        pub mod notifier;
        pub mod repository;
        pub mod use_cases {
            pub mod list;
            pub mod place;
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support;
