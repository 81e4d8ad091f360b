use std::sync::Arc;

use logger::TracingLogger;
use notifier::BroadcastOrderNotifier;
use storefront_client::{
    CartRepositoryHttp, DeliveryAddressRepositoryHttp, OrderRepositoryHttp, StorefrontClient,
};

use business::application::cart::add::AddToCartUseCaseImpl;
use business::application::cart::change_quantity::ChangeQuantityUseCaseImpl;
use business::application::cart::count::CartCountUseCaseImpl;
use business::application::cart::load::LoadCartUseCaseImpl;
use business::application::cart::remove::RemoveFromCartUseCaseImpl;
use business::application::checkout::prepare::PrepareCheckoutUseCaseImpl;
use business::application::checkout::select_payment::SelectPaymentUseCaseImpl;
use business::application::order::list::ListOrdersUseCaseImpl;
use business::application::order::place::PlaceOrderUseCaseImpl;
use business::domain::cart::repository::CartRepository;
use business::domain::cart::session::CartSessions;
use business::domain::checkout::drafts::CheckoutDrafts;
use business::domain::checkout::repository::DeliveryAddressRepository;
use business::domain::identity::IdentityProvider;
use business::domain::logger::Logger;
use business::domain::order::repository::OrderRepository;

use crate::api::cart::routes::CartApi;
use crate::api::checkout::routes::CheckoutApi;
use crate::api::health::routes::HealthApi;
use crate::api::operator::routes::OperatorApi;
use crate::api::order::routes::OrderApi;
use crate::api::security::{LegacyCookieIdentity, OperatorAccess, SignedSessionIdentity};
use crate::config::app_config::AppConfig;
use crate::config::cart_config::CartConfig;
use crate::config::identity_config::IdentityConfig;
use crate::config::operator_config::OperatorConfig;

/// Outbound adapters the use cases run against.
pub struct Adapters {
    pub cart_repository: Arc<dyn CartRepository>,
    pub address_repository: Arc<dyn DeliveryAddressRepository>,
    pub order_repository: Arc<dyn OrderRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub logger: Arc<dyn Logger>,
}

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub cart_api: CartApi,
    pub checkout_api: CheckoutApi,
    pub order_api: OrderApi,
    pub operator_api: OperatorApi,
    pub identity: Arc<dyn IdentityProvider>,
    pub operator_access: OperatorAccess,
}

impl DependencyContainer {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        // Infrastructure adapters
        let client = StorefrontClient::new(&config.backend.base_url, config.backend.timeout)?;
        let identity: Arc<dyn IdentityProvider> = match &config.identity {
            IdentityConfig::Legacy => {
                tracing::warn!("Legacy identity mode: the token cookie is trusted as the user id");
                Arc::new(LegacyCookieIdentity)
            }
            IdentityConfig::Jwt { secret } => Arc::new(SignedSessionIdentity::new(secret)),
        };

        let adapters = Adapters {
            cart_repository: Arc::new(CartRepositoryHttp::new(client.clone())),
            address_repository: Arc::new(DeliveryAddressRepositoryHttp::new(client.clone())),
            order_repository: Arc::new(OrderRepositoryHttp::new(client)),
            identity,
            logger: Arc::new(TracingLogger),
        };

        Ok(Self::with_adapters(
            adapters,
            config.cart,
            config.operator.clone(),
        ))
    }

    pub fn with_adapters(adapters: Adapters, cart: CartConfig, operator: OperatorConfig) -> Self {
        let Adapters {
            cart_repository,
            address_repository,
            order_repository,
            identity,
            logger,
        } = adapters;

        // Session state
        let sessions = Arc::new(CartSessions::new());
        let drafts = Arc::new(CheckoutDrafts::new());
        let notifier = Arc::new(BroadcastOrderNotifier::default());

        // Cart use cases
        let load_use_case = Arc::new(LoadCartUseCaseImpl {
            repository: cart_repository.clone(),
            sessions: sessions.clone(),
            logger: logger.clone(),
        });
        let add_use_case = Arc::new(AddToCartUseCaseImpl {
            repository: cart_repository.clone(),
            sessions: sessions.clone(),
            logger: logger.clone(),
        });
        let change_quantity_use_case = Arc::new(ChangeQuantityUseCaseImpl {
            repository: cart_repository.clone(),
            sessions: sessions.clone(),
            policy: cart.decrement_policy,
            logger: logger.clone(),
        });
        let remove_use_case = Arc::new(RemoveFromCartUseCaseImpl {
            repository: cart_repository.clone(),
            sessions: sessions.clone(),
            logger: logger.clone(),
        });
        let count_use_case = Arc::new(CartCountUseCaseImpl {
            sessions: sessions.clone(),
        });

        // Checkout use cases
        let prepare_use_case = Arc::new(PrepareCheckoutUseCaseImpl {
            cart_repository,
            address_repository,
            sessions: sessions.clone(),
            drafts: drafts.clone(),
            logger: logger.clone(),
        });
        let select_payment_use_case = Arc::new(SelectPaymentUseCaseImpl {
            drafts: drafts.clone(),
            logger: logger.clone(),
        });

        // Order use cases
        let place_use_case = Arc::new(PlaceOrderUseCaseImpl {
            repository: order_repository.clone(),
            drafts,
            sessions,
            notifier: notifier.clone(),
            logger: logger.clone(),
        });
        let list_use_case = Arc::new(ListOrdersUseCaseImpl {
            repository: order_repository,
            logger,
        });

        if operator.api_key.is_none() {
            tracing::info!("OPERATOR_API_KEY not set, operator order stream disabled");
        }

        Self {
            health_api: HealthApi,
            cart_api: CartApi::new(
                load_use_case,
                add_use_case,
                change_quantity_use_case,
                remove_use_case,
                count_use_case,
            ),
            checkout_api: CheckoutApi::new(prepare_use_case, select_payment_use_case),
            order_api: OrderApi::new(place_use_case, list_use_case),
            operator_api: OperatorApi::new(notifier),
            identity,
            operator_access: OperatorAccess::new(operator.api_key),
        }
    }
}
