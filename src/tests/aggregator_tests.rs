use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{Revert, SolCall, SolError};

use super::mock_aggregator_contract::fail_calldata;
use super::swap_test_context::{reverted, setup, token};
use crate::adapters::lifi::LiFiFacet;
use crate::diamond::{add_cut, lib_diamond};
use crate::env::Reverted;
use crate::types::facet_cut::{facet_cut, FacetCutAction};
use crate::types::interfaces::IAggregatorProxy::{
    FeeCollected, FeeRecipientNotSet, InvalidFeePercentage, InvalidNativeAmount,
    MalformedTokenWithFee, TokenCallFailed, TokensTransferred,
};
use crate::types::interfaces::{IDiamondCut, IERC20, IOneInchFacet};
use crate::types::provider::Provider;
use crate::types::token_with_fee::TokenWithFee;
use crate::Diamond;

#[test]
fn input_fee_is_taken_before_forwarding() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000_000);
    ctx.fund_aggregator(ctx.dai, 500_000);

    let call_data = ctx.aggregator_swap(ctx.usdc, 990_000, ctx.dai, 500_000);
    ctx.swap(
        Provider::OneInch,
        token(ctx.usdc, 100),
        1_000_000,
        token(ctx.dai, 0),
        call_data,
        0,
    )
    .unwrap();

    ctx.check_fee_recipient_balance(ctx.usdc, 10_000);
    ctx.check_balance(ctx.usdc, ctx.aggregator, 990_000);
    ctx.check_trader_balance(ctx.usdc, 0);
    ctx.check_trader_balance(ctx.dai, 500_000);
    ctx.check_no_leftovers();

    assert_eq!(
        ctx.diamond_events::<FeeCollected>(),
        vec![FeeCollected {
            token: ctx.usdc,
            recipient: ctx.fee_recipient,
            amount: U256::from(10_000u64),
        }]
    );
    assert_eq!(
        ctx.diamond_events::<TokensTransferred>(),
        vec![TokensTransferred {
            token: ctx.dai,
            to: ctx.trader,
            amount: U256::from(500_000u64),
        }]
    );
}

#[test]
fn output_fee_is_taken_from_bought_amount() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000_000);
    ctx.fund_aggregator(ctx.dai, 400_000);

    let call_data = ctx.aggregator_swap(ctx.usdc, 1_000_000, ctx.dai, 400_000);
    ctx.swap(
        Provider::OneInch,
        token(ctx.usdc, 0),
        1_000_000,
        token(ctx.dai, 50),
        call_data,
        0,
    )
    .unwrap();

    ctx.check_fee_recipient_balance(ctx.dai, 2_000);
    ctx.check_fee_recipient_balance(ctx.usdc, 0);
    ctx.check_trader_balance(ctx.dai, 398_000);
    ctx.check_no_leftovers();
}

#[test]
fn swap_native_for_token() {
    let mut ctx = setup();
    ctx.fund_trader(Address::ZERO, 1_000_000);
    ctx.fund_aggregator(ctx.dai, 300);

    let call_data = ctx.aggregator_swap(Address::ZERO, 990_000, ctx.dai, 300);
    ctx.swap(
        Provider::OneInch,
        token(Address::ZERO, 100),
        1_000_000,
        token(ctx.dai, 0),
        call_data,
        1_000_000,
    )
    .unwrap();

    ctx.check_trader_balance(Address::ZERO, 0);
    ctx.check_fee_recipient_balance(Address::ZERO, 10_000);
    ctx.check_balance(Address::ZERO, ctx.aggregator, 990_000);
    ctx.check_trader_balance(ctx.dai, 300);
    ctx.check_no_leftovers();
}

#[test]
fn swap_token_for_native() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000);
    ctx.fund_aggregator(Address::ZERO, 5_000);

    let call_data = ctx.aggregator_swap(ctx.usdc, 1_000, Address::ZERO, 5_000);
    ctx.swap(
        Provider::OneInch,
        token(ctx.usdc, 0),
        1_000,
        token(Address::ZERO, 200),
        call_data,
        0,
    )
    .unwrap();

    ctx.check_fee_recipient_balance(Address::ZERO, 100);
    ctx.check_trader_balance(Address::ZERO, 4_900);
    ctx.check_trader_balance(ctx.usdc, 0);
    ctx.check_no_leftovers();
}

#[test]
fn token_without_return_value_is_accepted() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdt, 1_000);
    ctx.fund_aggregator(ctx.dai, 10);

    let call_data = ctx.aggregator_swap(ctx.usdt, 990, ctx.dai, 10);
    ctx.swap(
        Provider::OneInch,
        token(ctx.usdt, 100),
        1_000,
        token(ctx.dai, 0),
        call_data,
        0,
    )
    .unwrap();

    ctx.check_fee_recipient_balance(ctx.usdt, 10);
    ctx.check_balance(ctx.usdt, ctx.aggregator, 990);
    ctx.check_trader_balance(ctx.dai, 10);
    ctx.check_no_leftovers();
}

#[test]
fn token_returning_false_fails_the_swap() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.broken_token, 1_000);
    ctx.fund_aggregator(ctx.dai, 10);

    let call_data = ctx.aggregator_swap(ctx.broken_token, 990, ctx.dai, 10);
    let result = ctx.swap(
        Provider::OneInch,
        token(ctx.broken_token, 100),
        1_000,
        token(ctx.dai, 0),
        call_data,
        0,
    );

    assert_eq!(
        result,
        Err(reverted(TokenCallFailed {
            token: ctx.broken_token
        }))
    );
    ctx.check_trader_balance(ctx.broken_token, 1_000);
    ctx.check_trader_balance(ctx.dai, 0);
}

#[test]
fn missing_approval_surfaces_the_token_revert() {
    let mut ctx = setup();
    let (usdc, trader) = (ctx.usdc, ctx.trader);
    ctx.mint(usdc, trader, 1_000);
    ctx.fund_aggregator(ctx.dai, 10);

    let call_data = ctx.aggregator_swap(usdc, 990, ctx.dai, 10);
    let result = ctx.swap(
        Provider::OneInch,
        token(usdc, 100),
        1_000,
        token(ctx.dai, 0),
        call_data,
        0,
    );

    // a token revert that carries a reason reaches the trader as is
    let reason = Revert {
        reason: "ERC20: insufficient allowance".to_string(),
    };
    assert_eq!(result, Err(Reverted(reason.abi_encode().into())));
    ctx.check_trader_balance(usdc, 1_000);
    ctx.check_fee_recipient_balance(usdc, 0);
    ctx.check_trader_balance(ctx.dai, 0);
}

#[test]
fn unspent_input_is_refunded() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000);
    ctx.fund_aggregator(ctx.dai, 700);

    let call_data = ctx.aggregator_swap(ctx.usdc, 600, ctx.dai, 700);
    ctx.swap(
        Provider::OneInch,
        token(ctx.usdc, 0),
        1_000,
        token(ctx.dai, 0),
        call_data,
        0,
    )
    .unwrap();

    ctx.check_trader_balance(ctx.usdc, 400);
    ctx.check_trader_balance(ctx.dai, 700);
    ctx.check_balance(ctx.usdc, ctx.aggregator, 600);
    ctx.check_no_leftovers();
    assert_eq!(
        ctx.diamond_events::<TokensTransferred>(),
        vec![
            TokensTransferred {
                token: ctx.usdc,
                to: ctx.trader,
                amount: U256::from(400u64),
            },
            TokensTransferred {
                token: ctx.dai,
                to: ctx.trader,
                amount: U256::from(700u64),
            },
        ]
    );
}

#[test]
fn same_token_swap_pays_out_everything_held() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000);
    ctx.fund_aggregator(ctx.usdc, 600);

    let call_data = ctx.aggregator_swap(ctx.usdc, 500, ctx.usdc, 600);
    ctx.swap(
        Provider::OneInch,
        token(ctx.usdc, 100),
        1_000,
        token(ctx.usdc, 0),
        call_data,
        0,
    )
    .unwrap();

    // 990 forwarded, 500 spent, 600 bought
    ctx.check_fee_recipient_balance(ctx.usdc, 10);
    ctx.check_trader_balance(ctx.usdc, 1_090);
    ctx.check_balance(ctx.usdc, ctx.aggregator, 500);
    ctx.check_no_leftovers();
}

#[test]
fn native_value_must_match_native_input() {
    let mut ctx = setup();
    ctx.fund_trader(Address::ZERO, 1_000);

    let call_data = ctx.aggregator_swap(Address::ZERO, 1_000, ctx.dai, 0);
    let result = ctx.swap(
        Provider::OneInch,
        token(Address::ZERO, 0),
        1_000,
        token(ctx.dai, 0),
        call_data,
        500,
    );

    assert_eq!(
        result,
        Err(reverted(InvalidNativeAmount {
            expected: U256::from(1_000u64),
            actual: U256::from(500u64),
        }))
    );
    ctx.check_trader_balance(Address::ZERO, 1_000);
}

#[test]
fn token_input_rejects_attached_value() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000);
    ctx.fund_trader(Address::ZERO, 5);

    let call_data = ctx.aggregator_swap(ctx.usdc, 1_000, ctx.dai, 0);
    let result = ctx.swap(
        Provider::OneInch,
        token(ctx.usdc, 0),
        1_000,
        token(ctx.dai, 0),
        call_data,
        5,
    );

    assert_eq!(
        result,
        Err(reverted(InvalidNativeAmount {
            expected: U256::ZERO,
            actual: U256::from(5u64),
        }))
    );
    ctx.check_trader_balance(Address::ZERO, 5);
    ctx.check_trader_balance(ctx.usdc, 1_000);
}

#[test]
fn aggregator_revert_is_propagated_unchanged() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000);

    let revert_data: Bytes = Revert {
        reason: "Return amount is not enough".to_string(),
    }
    .abi_encode()
    .into();
    let result = ctx.swap(
        Provider::OneInch,
        token(ctx.usdc, 100),
        1_000,
        token(ctx.dai, 100),
        fail_calldata(revert_data.clone()),
        0,
    );

    assert_eq!(result, Err(Reverted(revert_data)));
    ctx.check_trader_balance(ctx.usdc, 1_000);
    ctx.check_fee_recipient_balance(ctx.usdc, 0);
    ctx.check_no_leftovers();
    assert!(ctx.diamond_events::<FeeCollected>().is_empty());
}

#[test]
fn aggregator_revert_without_data_stays_empty() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000);

    let result = ctx.swap(
        Provider::LiFi,
        token(ctx.usdc, 0),
        1_000,
        token(ctx.dai, 0),
        fail_calldata(Bytes::new()),
        0,
    );

    assert_eq!(result, Err(Reverted::default()));
    ctx.check_trader_balance(ctx.usdc, 1_000);
}

#[test]
fn swap_through_lifi() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000_000);
    ctx.fund_aggregator(ctx.dai, 500_000);

    let call_data = ctx.aggregator_swap(ctx.usdc, 990_000, ctx.dai, 500_000);
    ctx.swap(
        Provider::LiFi,
        token(ctx.usdc, 100),
        1_000_000,
        token(ctx.dai, 10),
        call_data,
        0,
    )
    .unwrap();

    ctx.check_fee_recipient_balance(ctx.usdc, 10_000);
    ctx.check_fee_recipient_balance(ctx.dai, 500);
    ctx.check_trader_balance(ctx.dai, 499_500);
    ctx.check_no_leftovers();
}

#[test]
fn fee_of_one_hundred_percent_is_rejected() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000);

    let call_data = ctx.aggregator_swap(ctx.usdc, 0, ctx.dai, 0);
    let result = ctx.swap(
        Provider::OneInch,
        token(ctx.usdc, 10_000),
        1_000,
        token(ctx.dai, 0),
        call_data,
        0,
    );

    assert_eq!(
        result,
        Err(reverted(InvalidFeePercentage {
            fee: U256::from(10_000u64)
        }))
    );
}

#[test]
fn malformed_token_with_fee_is_rejected() {
    let mut ctx = setup();
    ctx.fund_trader(ctx.usdc, 1_000);

    let malformed = token(ctx.usdc, 1).encode() | (U256::from(1u64) << 200);
    let call = IOneInchFacet::callOneInchCall {
        fromTokenWithFee: malformed,
        fromAmount: U256::from(1_000u64),
        toTokenWithFee: token(ctx.dai, 0).encode(),
        callData: ctx.aggregator_swap(ctx.usdc, 1_000, ctx.dai, 0),
    };
    let (trader, diamond) = (ctx.trader, ctx.diamond());
    let result = ctx.env.transact(trader, diamond, U256::ZERO, &call.abi_encode());

    assert_eq!(
        result,
        Err(reverted(MalformedTokenWithFee {
            tokenWithFee: malformed
        }))
    );
    ctx.check_trader_balance(ctx.usdc, 1_000);
}

#[test]
fn fees_require_a_recipient() {
    let mut ctx = setup();
    let (deployer, owner, trader) = (ctx.deployer, ctx.owner, ctx.trader);

    // diamond wired without the initializer
    let bare = Diamond::deploy(
        &mut ctx.env,
        deployer,
        owner,
        ctx.deployment.diamond_cut_facet,
    )
    .unwrap();
    let one_inch = ctx.deployment.aggregator_facet(Provider::OneInch).unwrap();
    let cut = IDiamondCut::diamondCutCall {
        cuts: vec![facet_cut(
            one_inch,
            FacetCutAction::Add,
            vec![Provider::OneInch.swap_selector()],
        )],
        init: Address::ZERO,
        initCalldata: Bytes::new(),
    };
    ctx.env
        .transact(owner, bare, U256::ZERO, &cut.abi_encode())
        .unwrap();

    let usdc = ctx.usdc;
    ctx.mint(usdc, trader, 2_000);
    let approve = IERC20::approveCall {
        spender: bare,
        amount: U256::from(2_000u64),
    };
    ctx.env
        .transact(trader, usdc, U256::ZERO, &approve.abi_encode())
        .unwrap();

    let swap = |from: TokenWithFee, call_data: Bytes| IOneInchFacet::callOneInchCall {
        fromTokenWithFee: from.encode(),
        fromAmount: U256::from(1_000u64),
        toTokenWithFee: token(Address::ZERO, 0).encode(),
        callData: call_data,
    };

    let with_fee = swap(token(usdc, 100), ctx.aggregator_swap(usdc, 990, Address::ZERO, 0));
    assert_eq!(
        ctx.env
            .transact(trader, bare, U256::ZERO, &with_fee.abi_encode()),
        Err(reverted(FeeRecipientNotSet {}))
    );

    // no fee due, no recipient needed
    let without_fee = swap(token(usdc, 0), ctx.aggregator_swap(usdc, 1_000, Address::ZERO, 0));
    ctx.env
        .transact(trader, bare, U256::ZERO, &without_fee.abi_encode())
        .unwrap();
    ctx.check_trader_balance(usdc, 1_000);
    ctx.check_balance(usdc, ctx.aggregator, 1_000);
}

#[test]
fn adapter_facet_is_shared_between_diamonds() {
    let mut ctx = setup();
    let (deployer, owner) = (ctx.deployer, ctx.owner);
    let bare = Diamond::deploy(
        &mut ctx.env,
        deployer,
        owner,
        ctx.deployment.diamond_cut_facet,
    )
    .unwrap();
    let lifi = ctx.deployment.aggregator_facet(Provider::LiFi).unwrap();
    let facet = LiFiFacet::new(ctx.aggregator);
    let cut = IDiamondCut::diamondCutCall {
        cuts: vec![add_cut(lifi, &facet)],
        init: Address::ZERO,
        initCalldata: Bytes::new(),
    };
    ctx.env
        .transact(owner, bare, U256::ZERO, &cut.abi_encode())
        .unwrap();

    assert_eq!(
        lib_diamond::facet_address(&ctx.env, bare, Provider::LiFi.swap_selector()),
        lifi
    );
    assert_eq!(
        lib_diamond::facet_address(&ctx.env, ctx.diamond(), Provider::LiFi.swap_selector()),
        lifi
    );
}
